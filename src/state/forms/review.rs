//! Read-only review projection shown on the last step

use super::record::FormRecord;

/// Country code → display name
pub const COUNTRIES: &[(&str, &str)] = &[
    ("US", "United States"),
    ("UK", "United Kingdom"),
    ("CA", "Canada"),
    ("AU", "Australia"),
    ("IN", "India"),
    ("DE", "Germany"),
    ("FR", "France"),
    ("JP", "Japan"),
];

/// Language code → display name
pub const LANGUAGES: &[(&str, &str)] = &[("en", "English"), ("es", "Spanish"), ("fr", "French")];

const PLACEHOLDER: &str = "-";

pub fn country_name(code: &str) -> Option<&'static str> {
    COUNTRIES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

pub fn language_name(code: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

fn or_placeholder(value: &str) -> String {
    if value.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        value.to_string()
    }
}

/// Human-formatted summary of the record
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReviewProjection {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub username: String,
    pub country: String,
    pub language: String,
    pub notifications: String,
}

impl ReviewProjection {
    pub fn from_record(record: &FormRecord) -> Self {
        let phone = match (record.text("countryCode"), record.text("phone")) {
            (_, "") => PLACEHOLDER.to_string(),
            ("", phone) => phone.to_string(),
            (code, phone) => format!("{code} {phone}"),
        };
        let notifications = record.list("notifications");

        Self {
            full_name: format!(
                "{} {}",
                or_placeholder(record.text("firstName")),
                or_placeholder(record.text("lastName"))
            ),
            email: or_placeholder(record.text("email")),
            phone,
            address: or_placeholder(record.text("address")),
            username: or_placeholder(record.text("username")),
            country: country_name(record.text("country"))
                .unwrap_or(PLACEHOLDER)
                .to_string(),
            language: language_name(record.text("language"))
                .unwrap_or(PLACEHOLDER)
                .to_string(),
            notifications: if notifications.is_empty() {
                "None".to_string()
            } else {
                notifications.join(", ")
            },
        }
    }

    /// Label/value rows in display order
    pub fn rows(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Name", self.full_name.as_str()),
            ("Email", self.email.as_str()),
            ("Phone", self.phone.as_str()),
            ("Address", self.address.as_str()),
            ("Username", self.username.as_str()),
            ("Country", self.country.as_str()),
            ("Language", self.language.as_str()),
            ("Notifications", self.notifications.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::field::{FieldValue, FormField};
    use crate::state::forms::form_state::FormDefinition;
    use pretty_assertions::assert_eq;

    fn record_with(values: &[(&str, FieldValue)]) -> FormRecord {
        let mut def = FormDefinition::registration();
        let mut record = FormRecord::for_fields(def.fields());
        for (name, value) in values {
            let field: &mut FormField = def.field_mut(name).unwrap();
            field.set_value(value.clone());
            record.save(field);
        }
        record
    }

    #[test]
    fn test_empty_record_uses_placeholders() {
        let review = ReviewProjection::from_record(&record_with(&[]));
        assert_eq!(
            review,
            ReviewProjection {
                full_name: "- -".into(),
                email: "-".into(),
                phone: "-".into(),
                address: "-".into(),
                username: "-".into(),
                country: "-".into(),
                language: "-".into(),
                notifications: "None".into(),
            }
        );
    }

    #[test]
    fn test_full_record() {
        let review = ReviewProjection::from_record(&record_with(&[
            ("firstName", FieldValue::Text("Ada".into())),
            ("lastName", FieldValue::Text("Lovelace".into())),
            ("countryCode", FieldValue::Text("+44".into())),
            ("phone", FieldValue::Text("123-456-7890".into())),
            ("country", FieldValue::Text("UK".into())),
            ("language", FieldValue::Text("fr".into())),
            (
                "notifications",
                FieldValue::List(vec!["email".into(), "push".into()]),
            ),
        ]));
        assert_eq!(review.full_name, "Ada Lovelace");
        assert_eq!(review.phone, "+44 123-456-7890");
        assert_eq!(review.country, "United Kingdom");
        assert_eq!(review.language, "French");
        assert_eq!(review.notifications, "email, push");
    }

    #[test]
    fn test_partial_name_and_phone_without_code() {
        let review = ReviewProjection::from_record(&record_with(&[
            ("lastName", FieldValue::Text("Hopper".into())),
            ("phone", FieldValue::Text("555-555-5555".into())),
        ]));
        assert_eq!(review.full_name, "- Hopper");
        assert_eq!(review.phone, "555-555-5555");
    }

    #[test]
    fn test_unknown_codes() {
        assert_eq!(country_name("ZZ"), None);
        assert_eq!(language_name("de"), None);
        assert_eq!(country_name("JP"), Some("Japan"));
    }

    #[test]
    fn test_rows_order() {
        let review = ReviewProjection::default();
        let labels: Vec<_> = review.rows().into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels[0], "Name");
        assert_eq!(labels[7], "Notifications");
    }
}
