//! Accumulated form data and its export

use super::errors::FormError;
use super::field::{FieldValue, FormField};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field name → value for every field across all steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormRecord {
    values: BTreeMap<String, FieldValue>,
}

impl FormRecord {
    /// A record holding the empty value of every given field
    pub fn for_fields<'a>(fields: impl IntoIterator<Item = &'a FormField>) -> Self {
        let values = fields
            .into_iter()
            .map(|f| (f.name.clone(), f.value.empty_like()))
            .collect();
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Text value of a field, empty when missing or not text
    pub fn text(&self, name: &str) -> &str {
        self.get(name).map(FieldValue::as_text).unwrap_or("")
    }

    pub fn list(&self, name: &str) -> &[String] {
        self.get(name).map(FieldValue::as_list).unwrap_or(&[])
    }

    pub fn flag(&self, name: &str) -> bool {
        self.get(name).is_some_and(FieldValue::as_flag)
    }

    /// Store a field's current value; text is trimmed on the way in
    pub fn save(&mut self, field: &FormField) {
        self.values.insert(field.name.clone(), field.value.trimmed());
    }

    /// Every key back to the empty value of its shape
    pub fn reset(&mut self) {
        for value in self.values.values_mut() {
            *value = value.empty_like();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.values().all(FieldValue::is_blank)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.values.iter()
    }

    /// Pretty JSON snapshot of the record
    pub fn to_json(&self) -> Result<String, FormError> {
        serde_json::to_string_pretty(self).map_err(|e| FormError::Export(e.to_string()))
    }
}

/// A snapshot ready to be written or copied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub contents: String,
}

impl ExportFile {
    pub fn new(record: &FormRecord, at: DateTime<Utc>) -> Result<Self, FormError> {
        Ok(Self {
            file_name: format!("registration-data-{}.json", at.timestamp_millis()),
            contents: record.to_json()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::field::FieldKind;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn fields() -> Vec<FormField> {
        let mut email = FormField::text("email", "Email", FieldKind::Email);
        email.set_value(FieldValue::Text("  a@b.co ".into()));
        vec![
            email,
            FormField::multi_choice("notifications", "N", vec![]),
            FormField::checkbox("terms", "Terms"),
        ]
    }

    #[test]
    fn test_for_fields_starts_empty() {
        let record = FormRecord::for_fields(&fields());
        assert_eq!(record.len(), 3);
        assert!(record.is_empty());
        assert_eq!(record.text("email"), "");
    }

    #[test]
    fn test_save_trims_text() {
        let fields = fields();
        let mut record = FormRecord::for_fields(&fields);
        record.save(&fields[0]);
        assert_eq!(record.text("email"), "a@b.co");
    }

    #[test]
    fn test_reset_keeps_keys_and_shapes() {
        let mut fields = fields();
        let mut record = FormRecord::for_fields(&fields);
        fields[1].set_value(FieldValue::List(vec!["sms".into()]));
        fields[2].set_value(FieldValue::Flag(true));
        for f in &fields {
            record.save(f);
        }
        assert!(!record.is_empty());

        record.reset();
        assert_eq!(record.len(), 3);
        assert!(record.is_empty());
        assert_eq!(record.get("notifications"), Some(&FieldValue::List(vec![])));
        assert_eq!(record.get("terms"), Some(&FieldValue::Flag(false)));
    }

    #[test]
    fn test_json_is_sorted_and_plain() {
        let fields = fields();
        let mut record = FormRecord::for_fields(&fields);
        record.save(&fields[0]);
        let json = record.to_json().unwrap();
        assert_eq!(
            json,
            "{\n  \"email\": \"a@b.co\",\n  \"notifications\": [],\n  \"terms\": false\n}"
        );
    }

    #[test]
    fn test_export_file_name_uses_millis() {
        let record = FormRecord::for_fields(&fields());
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let export = ExportFile::new(&record, at).unwrap();
        assert_eq!(export.file_name, "registration-data-1700000000123.json");
        let parsed: FormRecord = serde_json::from_str(&export.contents).unwrap();
        assert_eq!(parsed, record);
    }
}
