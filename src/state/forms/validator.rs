//! Field validation rules
//!
//! Every check here is a pure, total function over a single value. The
//! per-kind rules live in one table ([`rules_for`]) so that validating a field
//! and choosing its error message walk the same ordered list.

use super::field::{FieldKind, FieldValue};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Characters that satisfy the password "special character" criterion
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Minimum password length
pub const PASSWORD_MIN_LENGTH: usize = 8;

const NAME_MIN_LENGTH: usize = 2;
const USERNAME_MIN_LENGTH: usize = 4;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));

static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(r"^[0-9]{3}-[0-9]{3}-[0-9]{4}$"));

fn compile_regex(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        // Covered by the email and phone tests below
        Err(err) => panic!("invalid regex pattern `{pattern}`: {err}"),
    }
}

/// Why a field failed validation. The Display text is the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind {
    #[error("This field is required")]
    RequiredMissing,
    #[error("Please enter a valid email address")]
    InvalidEmailFormat,
    #[error("Please enter a valid phone number (123-456-7890)")]
    InvalidPhoneFormat,
    #[error("Password must be at least 8 characters")]
    PasswordTooShort,
    #[error("Password must contain at least one uppercase letter")]
    PasswordMissingUppercase,
    #[error("Password must contain at least one lowercase letter")]
    PasswordMissingLowercase,
    #[error("Password must contain at least one number")]
    PasswordMissingDigit,
    #[error("Password must contain at least one special character")]
    PasswordMissingSpecial,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Must be at least 2 characters")]
    NameTooShort,
    #[error("Username must be at least 4 characters")]
    UsernameTooShort,
    #[error("You must agree to the terms and conditions")]
    TermsNotAccepted,
    #[error("Please enter a valid value")]
    GenericInvalid,
}

/// One entry of the rule table: the value must satisfy `check`, otherwise the
/// field reports `error`.
#[derive(Clone, Copy)]
pub struct Rule {
    pub check: fn(&str) -> bool,
    pub error: ErrorKind,
}

const EMAIL_RULES: &[Rule] = &[Rule {
    check: is_email_valid,
    error: ErrorKind::InvalidEmailFormat,
}];

const PHONE_RULES: &[Rule] = &[Rule {
    check: is_phone_valid,
    error: ErrorKind::InvalidPhoneFormat,
}];

const PASSWORD_RULES: &[Rule] = &[
    Rule {
        check: has_min_length,
        error: ErrorKind::PasswordTooShort,
    },
    Rule {
        check: has_uppercase,
        error: ErrorKind::PasswordMissingUppercase,
    },
    Rule {
        check: has_lowercase,
        error: ErrorKind::PasswordMissingLowercase,
    },
    Rule {
        check: has_digit,
        error: ErrorKind::PasswordMissingDigit,
    },
    Rule {
        check: has_special,
        error: ErrorKind::PasswordMissingSpecial,
    },
];

const NAME_RULES: &[Rule] = &[Rule {
    check: is_name_valid,
    error: ErrorKind::NameTooShort,
}];

const USERNAME_RULES: &[Rule] = &[Rule {
    check: is_username_valid,
    error: ErrorKind::UsernameTooShort,
}];

/// Ordered format rules for a field kind, most specific first
pub fn rules_for(kind: FieldKind) -> &'static [Rule] {
    match kind {
        FieldKind::Email => EMAIL_RULES,
        FieldKind::Phone => PHONE_RULES,
        FieldKind::Password => PASSWORD_RULES,
        FieldKind::Name => NAME_RULES,
        FieldKind::Username => USERNAME_RULES,
        // Checked through a declared `Matches` relation instead
        FieldKind::ConfirmPassword => &[],
        FieldKind::Generic => &[],
    }
}

pub fn is_required_satisfied(value: &FieldValue, required: bool) -> bool {
    !(required && value.is_blank())
}

pub fn is_email_valid(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

pub fn is_phone_valid(value: &str) -> bool {
    PHONE_REGEX.is_match(value)
}

pub fn is_password_valid(value: &str) -> bool {
    PASSWORD_RULES.iter().all(|rule| (rule.check)(value))
}

pub fn is_name_valid(value: &str) -> bool {
    value.chars().count() >= NAME_MIN_LENGTH
}

pub fn is_username_valid(value: &str) -> bool {
    value.chars().count() >= USERNAME_MIN_LENGTH
}

fn has_min_length(value: &str) -> bool {
    value.chars().count() >= PASSWORD_MIN_LENGTH
}

fn has_uppercase(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_uppercase())
}

fn has_lowercase(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_lowercase())
}

fn has_digit(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_digit())
}

fn has_special(value: &str) -> bool {
    value.chars().any(|c| SPECIAL_CHARACTERS.contains(c))
}

/// Most specific error for a value: required-empty first, then the first
/// failing format rule of the kind. `None` means the value is valid.
pub fn error_for(kind: FieldKind, value: &FieldValue, required: bool) -> Option<ErrorKind> {
    if !is_required_satisfied(value, required) {
        return Some(ErrorKind::RequiredMissing);
    }
    let FieldValue::Text(text) = value else {
        return None;
    };
    let text = text.trim();
    if text.is_empty() {
        // Optional and left blank
        return None;
    }
    rules_for(kind)
        .iter()
        .find(|rule| !(rule.check)(text))
        .map(|rule| rule.error)
}

/// Validation outcome for one field
pub fn validate(kind: FieldKind, value: &FieldValue, required: bool) -> Result<(), ErrorKind> {
    match error_for(kind, value, required) {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

/// Items of the password requirement checklist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PasswordRequirement {
    Length,
    Uppercase,
    Lowercase,
    Number,
    Special,
}

impl PasswordRequirement {
    pub const ALL: [PasswordRequirement; 5] = [
        PasswordRequirement::Length,
        PasswordRequirement::Uppercase,
        PasswordRequirement::Lowercase,
        PasswordRequirement::Number,
        PasswordRequirement::Special,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Length => "At least 8 characters",
            Self::Uppercase => "One uppercase letter",
            Self::Lowercase => "One lowercase letter",
            Self::Number => "One number",
            Self::Special => "One special character",
        }
    }

    pub fn is_met(&self, value: &str) -> bool {
        match self {
            Self::Length => has_min_length(value),
            Self::Uppercase => has_uppercase(value),
            Self::Lowercase => has_lowercase(value),
            Self::Number => has_digit(value),
            Self::Special => has_special(value),
        }
    }
}

/// Checklist state for a password value
pub fn password_requirements(value: &str) -> Vec<(PasswordRequirement, bool)> {
    PasswordRequirement::ALL
        .iter()
        .map(|req| (*req, req.is_met(value)))
        .collect()
}

/// Coarse strength label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthBand {
    Weak,
    Fair,
    Strong,
}

impl StrengthBand {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Weak => "Weak",
            Self::Fair => "Fair",
            Self::Strong => "Strong",
        }
    }
}

/// Strength score (0..=100 in steps of 20) and its band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordStrength {
    pub score: u8,
    pub band: StrengthBand,
}

impl PasswordStrength {
    pub fn from_score(score: u8) -> Self {
        let band = if score < 40 {
            StrengthBand::Weak
        } else if score <= 80 {
            StrengthBand::Fair
        } else {
            StrengthBand::Strong
        };
        Self { score, band }
    }
}

/// +20 for every satisfied criterion; scored on the raw (untrimmed) value
pub fn password_strength_score(value: &str) -> u8 {
    PasswordRequirement::ALL
        .iter()
        .filter(|req| req.is_met(value))
        .count() as u8
        * 20
}

pub fn password_strength(value: &str) -> PasswordStrength {
    PasswordStrength::from_score(password_strength_score(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    mod predicates {
        use super::*;

        #[test]
        fn test_email_examples() {
            assert!(is_email_valid("a@b.co"));
            assert!(!is_email_valid("a@b"));
            assert!(!is_email_valid("a b@c.com"));
            assert!(!is_email_valid(""));
            assert!(!is_email_valid("   "));
        }

        #[test]
        fn test_phone_examples() {
            assert!(is_phone_valid("123-456-7890"));
            assert!(!is_phone_valid("1234567890"));
            assert!(!is_phone_valid("12-345-6789"));
            assert!(!is_phone_valid("123-456-78901"));
        }

        #[test]
        fn test_name_and_username_lengths() {
            assert!(!is_name_valid("A"));
            assert!(is_name_valid("Al"));
            assert!(!is_username_valid("abc"));
            assert!(is_username_valid("abcd"));
        }

        #[test]
        fn test_password_examples() {
            assert!(is_password_valid("Abcdef1!"));
            assert!(!is_password_valid("Abcde1!"));
            assert!(!is_password_valid("abcdef1!"));
            assert!(!is_password_valid("ABCDEF1!"));
            assert!(!is_password_valid("Abcdefg!"));
            assert!(!is_password_valid("Abcdefg1"));
        }

        #[test]
        fn test_required() {
            assert!(!is_required_satisfied(&text("  "), true));
            assert!(is_required_satisfied(&text("  "), false));
            assert!(is_required_satisfied(&text("x"), true));
            assert!(!is_required_satisfied(&FieldValue::List(vec![]), true));
        }
    }

    mod messages {
        use super::*;

        #[test]
        fn test_required_beats_format() {
            assert_eq!(
                error_for(FieldKind::Email, &text(" "), true),
                Some(ErrorKind::RequiredMissing)
            );
        }

        #[test]
        fn test_optional_blank_is_valid() {
            assert_eq!(error_for(FieldKind::Phone, &text(""), false), None);
        }

        #[test]
        fn test_password_priority_order() {
            let cases = [
                ("Ab1!", ErrorKind::PasswordTooShort),
                ("abcdefg1!", ErrorKind::PasswordMissingUppercase),
                ("ABCDEFG1!", ErrorKind::PasswordMissingLowercase),
                ("Abcdefgh!", ErrorKind::PasswordMissingDigit),
                ("Abcdefgh1", ErrorKind::PasswordMissingSpecial),
            ];
            for (value, expected) in cases {
                assert_eq!(
                    error_for(FieldKind::Password, &text(value), true),
                    Some(expected),
                    "value {value:?}"
                );
            }
        }

        #[test]
        fn test_value_is_trimmed_before_rules() {
            assert_eq!(error_for(FieldKind::Email, &text("  a@b.co "), true), None);
            assert_eq!(
                error_for(FieldKind::Name, &text(" a "), true),
                Some(ErrorKind::NameTooShort)
            );
        }

        #[test]
        fn test_generic_and_confirm_have_no_format_rules() {
            assert!(validate(FieldKind::Generic, &text("anything"), true).is_ok());
            assert!(validate(FieldKind::ConfirmPassword, &text("x"), true).is_ok());
        }

        #[test]
        fn test_display_messages() {
            assert_eq!(ErrorKind::RequiredMissing.to_string(), "This field is required");
            assert_eq!(
                ErrorKind::InvalidPhoneFormat.to_string(),
                "Please enter a valid phone number (123-456-7890)"
            );
        }
    }

    mod strength {
        use super::*;

        #[test]
        fn test_band_boundaries() {
            assert_eq!(PasswordStrength::from_score(0).band, StrengthBand::Weak);
            assert_eq!(PasswordStrength::from_score(20).band, StrengthBand::Weak);
            assert_eq!(PasswordStrength::from_score(40).band, StrengthBand::Fair);
            assert_eq!(PasswordStrength::from_score(60).band, StrengthBand::Fair);
            assert_eq!(PasswordStrength::from_score(80).band, StrengthBand::Fair);
            assert_eq!(PasswordStrength::from_score(100).band, StrengthBand::Strong);
        }

        #[test]
        fn test_scores() {
            assert_eq!(password_strength_score(""), 0);
            assert_eq!(password_strength_score("a"), 20);
            assert_eq!(password_strength_score("aA"), 40);
            assert_eq!(password_strength_score("aA1"), 60);
            assert_eq!(password_strength_score("aA1!"), 80);
            assert_eq!(password_strength("aA1!aaaa").band, StrengthBand::Strong);
        }

        #[test]
        fn test_requirements_checklist() {
            let reqs = password_requirements("abc1");
            assert_eq!(reqs.len(), 5);
            assert!(reqs.contains(&(PasswordRequirement::Lowercase, true)));
            assert!(reqs.contains(&(PasswordRequirement::Number, true)));
            assert!(reqs.contains(&(PasswordRequirement::Length, false)));
        }
    }

    /// Builds a password from the criteria to include
    fn compose(length: bool, upper: bool, lower: bool, digit: bool, special: bool) -> String {
        let mut s = String::new();
        if upper {
            s.push('Q');
        }
        if lower {
            s.push('q');
        }
        if digit {
            s.push('7');
        }
        if special {
            s.push('#');
        }
        // Pad with spaces so no criterion is touched except length
        let target = if length { 8 } else { 7 };
        while s.chars().count() < target {
            s.push(' ');
        }
        s
    }

    proptest! {
        #[test]
        fn password_valid_iff_all_criteria(
            length: bool, upper: bool, lower: bool, digit: bool, special: bool
        ) {
            let pw = compose(length, upper, lower, digit, special);
            let expected = length && upper && lower && digit && special;
            prop_assert_eq!(is_password_valid(&pw), expected);
        }

        #[test]
        fn password_valid_matches_checklist(pw in "\\PC{0,16}") {
            let all_met = password_requirements(&pw).iter().all(|(_, met)| *met);
            prop_assert_eq!(is_password_valid(&pw), all_met);
        }

        #[test]
        fn strength_is_monotonic(pw in "[a-z]{0,6}", extra in "[A-Z0-9!]{1,3}") {
            let base = password_strength_score(&pw);
            let more = password_strength_score(&format!("{pw}{extra}"));
            prop_assert!(more >= base);
            prop_assert_eq!(more % 20, 0);
            prop_assert!(more <= 100);
        }
    }
}
