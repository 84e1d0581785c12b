//! Step and form definitions

use super::field::{FieldKind, FieldOption, FormField};
use super::validator::ErrorKind;

/// Trait for moving focus between the inputs of one step
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// One page of the form
#[derive(Debug, Clone)]
pub struct StepDefinition {
    pub id: String,
    pub title: String,
    pub fields: Vec<FormField>,
    pub active_field_index: usize,
}

impl StepDefinition {
    pub fn new(id: &str, title: &str, fields: Vec<FormField>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            fields,
            active_field_index: 0,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Name of the focused input, if the step has any
    pub fn active_field_name(&self) -> Option<&str> {
        self.get_field(self.active_field_index)
            .map(|f| f.name.as_str())
    }
}

impl Form for StepDefinition {
    fn field_count(&self) -> usize {
        self.fields.len()
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.fields.len().saturating_sub(1));
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.active_field_index)
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        self.fields.get(index)
    }
}

/// A declared rule between two fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRelation {
    /// When both are non-empty, `confirm` must equal `field`; otherwise
    /// `confirm` is flagged with `error`.
    Matches {
        field: String,
        confirm: String,
        error: ErrorKind,
    },
}

impl FieldRelation {
    pub fn matches(field: &str, confirm: &str) -> Self {
        FieldRelation::Matches {
            field: field.to_string(),
            confirm: confirm.to_string(),
            error: ErrorKind::PasswordMismatch,
        }
    }

    /// Both field names the relation reads
    pub fn fields(&self) -> (&str, &str) {
        match self {
            FieldRelation::Matches { field, confirm, .. } => (field, confirm),
        }
    }
}

/// Constructor-provided configuration of a form
#[derive(Debug, Clone)]
pub struct FormDefinition {
    pub steps: Vec<StepDefinition>,
    pub relations: Vec<FieldRelation>,
    /// Checkbox that must be ticked before submitting
    pub terms_field: String,
}

impl FormDefinition {
    /// The four-step registration form: personal, account, preferences, review
    pub fn registration() -> Self {
        let personal = StepDefinition::new(
            "personal",
            "Personal Info",
            vec![
                FormField::text("firstName", "First Name", FieldKind::Name)
                    .required()
                    .with_max_length(50),
                FormField::text("lastName", "Last Name", FieldKind::Name)
                    .required()
                    .with_max_length(50),
                FormField::text("email", "Email", FieldKind::Email).required(),
                FormField::choice(
                    "countryCode",
                    "Country Code",
                    vec![
                        FieldOption::new("+1", "+1 (US/CA)"),
                        FieldOption::new("+44", "+44 (UK)"),
                        FieldOption::new("+61", "+61 (AU)"),
                        FieldOption::new("+91", "+91 (IN)"),
                        FieldOption::new("+49", "+49 (DE)"),
                        FieldOption::new("+33", "+33 (FR)"),
                        FieldOption::new("+81", "+81 (JP)"),
                    ],
                ),
                FormField::text("phone", "Phone (123-456-7890)", FieldKind::Phone).required(),
                FormField::multiline("address", "Address").with_max_length(200),
                FormField::file("profilePic", "Profile Picture"),
            ],
        );

        let account = StepDefinition::new(
            "account",
            "Account",
            vec![
                FormField::text("username", "Username", FieldKind::Username)
                    .required()
                    .with_max_length(20),
                FormField::text("password", "Password", FieldKind::Password).required(),
                FormField::text("confirmPassword", "Confirm Password", FieldKind::ConfirmPassword)
                    .required(),
            ],
        );

        let preferences = StepDefinition::new(
            "preferences",
            "Preferences",
            vec![
                FormField::choice(
                    "country",
                    "Country",
                    super::review::COUNTRIES
                        .iter()
                        .map(|(code, name)| FieldOption::new(code, name))
                        .collect(),
                )
                .required(),
                FormField::choice(
                    "language",
                    "Preferred Language",
                    super::review::LANGUAGES
                        .iter()
                        .map(|(code, name)| FieldOption::new(code, name))
                        .collect(),
                )
                .required(),
                FormField::multi_choice(
                    "notifications",
                    "Notifications",
                    vec![
                        FieldOption::new("email", "Email"),
                        FieldOption::new("sms", "SMS"),
                        FieldOption::new("push", "Push"),
                    ],
                ),
                FormField::multiline("bio", "Bio").with_max_length(500),
            ],
        );

        let review = StepDefinition::new(
            "review",
            "Review",
            vec![FormField::checkbox("terms", "I agree to the Terms and Conditions")],
        );

        Self {
            steps: vec![personal, account, preferences, review],
            relations: vec![FieldRelation::matches("password", "confirmPassword")],
            terms_field: "terms".to_string(),
        }
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Index of the step that declares `name`
    pub fn step_of(&self, name: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.has_field(name))
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.steps.iter().find_map(|s| s.field(name))
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.steps.iter_mut().find_map(|s| s.field_mut(name))
    }

    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.steps.iter().flat_map(|s| s.fields.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod step_definition {
        use super::*;

        #[test]
        fn test_next_field_cycles() {
            let mut step = FormDefinition::registration().steps.remove(1);
            assert_eq!(step.active_field_name(), Some("username"));
            for _ in 0..3 {
                step.next_field();
            }
            assert_eq!(step.active_field_index, 0);
        }

        #[test]
        fn test_prev_field_wraps_to_last() {
            let mut step = FormDefinition::registration().steps.remove(1);
            step.prev_field();
            assert_eq!(step.active_field_name(), Some("confirmPassword"));
        }

        #[test]
        fn test_set_active_field_clamps() {
            let mut step = FormDefinition::registration().steps.remove(0);
            step.set_active_field(100);
            assert_eq!(step.active_field_index, step.fields.len() - 1);
        }

        #[test]
        fn test_empty_step_focus_is_noop() {
            let mut step = StepDefinition::new("empty", "Empty", vec![]);
            step.next_field();
            step.prev_field();
            assert!(step.get_active_field_mut().is_none());
        }
    }

    mod registration {
        use super::*;

        #[test]
        fn test_has_four_steps() {
            let def = FormDefinition::registration();
            let ids: Vec<_> = def.steps.iter().map(|s| s.id.as_str()).collect();
            assert_eq!(ids, ["personal", "account", "preferences", "review"]);
        }

        #[test]
        fn test_field_names_are_unique() {
            let def = FormDefinition::registration();
            let mut names: Vec<_> = def.fields().map(|f| f.name.clone()).collect();
            let total = names.len();
            names.sort();
            names.dedup();
            assert_eq!(names.len(), total);
        }

        #[test]
        fn test_step_of() {
            let def = FormDefinition::registration();
            assert_eq!(def.step_of("email"), Some(0));
            assert_eq!(def.step_of("confirmPassword"), Some(1));
            assert_eq!(def.step_of("terms"), Some(3));
            assert_eq!(def.step_of("nope"), None);
        }

        #[test]
        fn test_password_relation_declared() {
            let def = FormDefinition::registration();
            assert_eq!(def.relations[0].fields(), ("password", "confirmPassword"));
        }

        #[test]
        fn test_terms_is_not_required_per_step() {
            let def = FormDefinition::registration();
            assert!(!def.field("terms").unwrap().required);
        }
    }
}
