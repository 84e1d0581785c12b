//! Form field value objects

use serde::{Deserialize, Serialize};

/// Type-safe field values
///
/// Serialized untagged so an exported record reads as plain JSON
/// (`"text"`, `["a", "b"]`, `true`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
    Flag(bool),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    /// The empty value of the same shape
    pub fn empty_like(&self) -> Self {
        match self {
            FieldValue::Text(_) => FieldValue::Text(String::new()),
            FieldValue::List(_) => FieldValue::List(Vec::new()),
            FieldValue::Flag(_) => FieldValue::Flag(false),
        }
    }

    /// True when the value counts as "nothing entered"
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Flag(checked) => !checked,
        }
    }

    /// Get the text value (returns empty string for list and flag values)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            _ => "",
        }
    }

    /// Get the list value (returns an empty slice for text and flag values)
    pub fn as_list(&self) -> &[String] {
        match self {
            FieldValue::List(items) => items,
            _ => &[],
        }
    }

    /// Get the flag value (false for anything but a checked flag)
    pub fn as_flag(&self) -> bool {
        matches!(self, FieldValue::Flag(true))
    }

    /// Copy with surrounding whitespace removed from text
    pub fn trimmed(&self) -> Self {
        match self {
            FieldValue::Text(s) => FieldValue::Text(s.trim().to_string()),
            other => other.clone(),
        }
    }

    fn same_shape(&self, other: &FieldValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Closed set of validation kinds a field can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Email,
    Phone,
    Password,
    ConfirmPassword,
    Name,
    Username,
    Generic,
}

/// A selectable option for choice fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

impl FieldOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// How the field takes input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputShape {
    Text,
    Multiline,
    /// Single selection (select box / radio group)
    Choice(Vec<FieldOption>),
    /// Checkbox group
    MultiChoice(Vec<FieldOption>),
    /// Single checkbox
    Checkbox,
    /// File picker, stores the file name
    File,
}

impl InputShape {
    fn empty_value(&self) -> FieldValue {
        match self {
            InputShape::MultiChoice(_) => FieldValue::List(Vec::new()),
            InputShape::Checkbox => FieldValue::Flag(false),
            _ => FieldValue::Text(String::new()),
        }
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub shape: InputShape,
    pub required: bool,
    pub max_length: Option<usize>,
    pub value: FieldValue,
}

impl FormField {
    fn with_shape(name: &str, label: &str, kind: FieldKind, shape: InputShape) -> Self {
        let value = shape.empty_value();
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            shape,
            required: false,
            max_length: None,
            value,
        }
    }

    /// Create a new single-line text field
    pub fn text(name: &str, label: &str, kind: FieldKind) -> Self {
        Self::with_shape(name, label, kind, InputShape::Text)
    }

    /// Create a new multiline text field
    pub fn multiline(name: &str, label: &str) -> Self {
        Self::with_shape(name, label, FieldKind::Generic, InputShape::Multiline)
    }

    /// Create a single-selection field
    pub fn choice(name: &str, label: &str, options: Vec<FieldOption>) -> Self {
        Self::with_shape(name, label, FieldKind::Generic, InputShape::Choice(options))
    }

    /// Create a checkbox group
    pub fn multi_choice(name: &str, label: &str, options: Vec<FieldOption>) -> Self {
        Self::with_shape(
            name,
            label,
            FieldKind::Generic,
            InputShape::MultiChoice(options),
        )
    }

    /// Create a single checkbox
    pub fn checkbox(name: &str, label: &str) -> Self {
        Self::with_shape(name, label, FieldKind::Generic, InputShape::Checkbox)
    }

    /// Create a file field
    pub fn file(name: &str, label: &str) -> Self {
        Self::with_shape(name, label, FieldKind::Generic, InputShape::File)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self.shape, InputShape::Multiline)
    }

    /// Options for choice and checkbox-group fields
    pub fn options(&self) -> &[FieldOption] {
        match &self.shape {
            InputShape::Choice(options) | InputShape::MultiChoice(options) => options,
            _ => &[],
        }
    }

    /// Whether typed characters go straight into the value
    pub fn accepts_typing(&self) -> bool {
        matches!(self.shape, InputShape::Text | InputShape::Multiline)
    }

    /// Get the text value (returns empty string for list and flag fields)
    pub fn as_text(&self) -> &str {
        self.value.as_text()
    }

    /// Replace the value, cutting text at `max_length`; returns false when
    /// the shape doesn't fit
    pub fn set_value(&mut self, mut value: FieldValue) -> bool {
        if !self.value.same_shape(&value) {
            return false;
        }
        if let (FieldValue::Text(s), Some(max)) = (&mut value, self.max_length) {
            if let Some((cut, _)) = s.char_indices().nth(max) {
                s.truncate(cut);
            }
        }
        self.value = value;
        true
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        if !self.accepts_typing() {
            return;
        }
        if let FieldValue::Text(s) = &mut self.value {
            if self.max_length.is_some_and(|max| s.chars().count() >= max) {
                return;
            }
            s.push(c);
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        if let FieldValue::Text(s) = &mut self.value {
            s.pop();
        }
    }

    /// Clear the field value
    pub fn clear(&mut self) {
        self.value = self.value.empty_like();
    }

    /// Step through the options of a single-selection field
    pub fn cycle_choice(&mut self, forward: bool) {
        let InputShape::Choice(options) = &self.shape else {
            return;
        };
        if options.is_empty() {
            return;
        }
        let current = options
            .iter()
            .position(|o| o.value == self.value.as_text());
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => options.len() - 1,
            (Some(i), true) => (i + 1) % options.len(),
            (Some(0), false) => options.len() - 1,
            (Some(i), false) => i - 1,
        };
        self.value = FieldValue::Text(options[next].value.clone());
    }

    /// Toggle one option of a checkbox group, keeping declaration order
    pub fn toggle_option(&mut self, index: usize) {
        let InputShape::MultiChoice(options) = &self.shape else {
            return;
        };
        let Some(option) = options.get(index) else {
            return;
        };
        let mut selected: Vec<String> = self.value.as_list().to_vec();
        if let Some(pos) = selected.iter().position(|v| v == &option.value) {
            selected.remove(pos);
        } else {
            selected.push(option.value.clone());
        }
        let ordered = options
            .iter()
            .filter(|o| selected.contains(&o.value))
            .map(|o| o.value.clone())
            .collect();
        self.value = FieldValue::List(ordered);
    }

    /// Flip a checkbox
    pub fn toggle_flag(&mut self) {
        if let FieldValue::Flag(checked) = &mut self.value {
            *checked = !*checked;
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match (&self.shape, &self.value) {
            (InputShape::Choice(options), FieldValue::Text(v)) => options
                .iter()
                .find(|o| &o.value == v)
                .map(|o| o.label.clone())
                .unwrap_or_else(|| v.clone()),
            (InputShape::MultiChoice(options), FieldValue::List(selected)) => options
                .iter()
                .enumerate()
                .map(|(i, o)| {
                    let mark = if selected.contains(&o.value) { "x" } else { " " };
                    format!("{}[{mark}] {}", i + 1, o.label)
                })
                .collect::<Vec<_>>()
                .join("  "),
            (InputShape::Checkbox, FieldValue::Flag(checked)) => {
                if *checked {
                    "[x] accepted".to_string()
                } else {
                    "[ ] not accepted".to_string()
                }
            }
            (_, value) if matches!(self.kind, FieldKind::Password | FieldKind::ConfirmPassword) => {
                "•".repeat(value.as_text().chars().count())
            }
            (_, value) => value.as_text().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn countries() -> Vec<FieldOption> {
        vec![FieldOption::new("US", "United States"), FieldOption::new("CA", "Canada")]
    }

    #[test]
    fn test_new_fields_start_empty() {
        assert_eq!(
            FormField::text("email", "Email", FieldKind::Email).value,
            FieldValue::Text(String::new())
        );
        assert_eq!(
            FormField::multi_choice("n", "N", countries()).value,
            FieldValue::List(vec![])
        );
        assert_eq!(FormField::checkbox("terms", "Terms").value, FieldValue::Flag(false));
    }

    #[test]
    fn test_set_value_rejects_other_shape() {
        let mut field = FormField::checkbox("terms", "Terms");
        assert!(!field.set_value(FieldValue::Text("yes".into())));
        assert!(field.set_value(FieldValue::Flag(true)));
        assert!(field.value.as_flag());
    }

    #[test]
    fn test_push_char_respects_max_length() {
        let mut field = FormField::text("firstName", "First", FieldKind::Name).with_max_length(2);
        field.push_char('a');
        field.push_char('b');
        field.push_char('c');
        assert_eq!(field.as_text(), "ab");
        field.pop_char();
        assert_eq!(field.as_text(), "a");
    }

    #[test]
    fn test_set_value_cuts_at_max_length() {
        let mut field = FormField::text("firstName", "First", FieldKind::Name).with_max_length(3);
        assert!(field.set_value(FieldValue::Text("Zoë Ann".into())));
        assert_eq!(field.as_text(), "Zoë");
        assert!(field.set_value(FieldValue::Text("Al".into())));
        assert_eq!(field.as_text(), "Al");
    }

    #[test]
    fn test_push_char_ignored_on_choice() {
        let mut field = FormField::choice("country", "Country", countries());
        field.push_char('x');
        assert_eq!(field.as_text(), "");
    }

    #[test]
    fn test_cycle_choice_wraps_both_ways() {
        let mut field = FormField::choice("country", "Country", countries());
        field.cycle_choice(true);
        assert_eq!(field.as_text(), "US");
        field.cycle_choice(true);
        assert_eq!(field.as_text(), "CA");
        field.cycle_choice(true);
        assert_eq!(field.as_text(), "US");
        field.cycle_choice(false);
        assert_eq!(field.as_text(), "CA");
    }

    #[test]
    fn test_toggle_option_keeps_declaration_order() {
        let mut field = FormField::multi_choice("n", "N", countries());
        field.toggle_option(1);
        field.toggle_option(0);
        assert_eq!(field.value.as_list(), ["US".to_string(), "CA".to_string()]);
        field.toggle_option(0);
        assert_eq!(field.value.as_list(), ["CA".to_string()]);
        field.toggle_option(9);
        assert_eq!(field.value.as_list().len(), 1);
    }

    #[test]
    fn test_blank_detection() {
        assert!(FieldValue::Text("   ".into()).is_blank());
        assert!(FieldValue::List(vec![]).is_blank());
        assert!(FieldValue::Flag(false).is_blank());
        assert!(!FieldValue::Flag(true).is_blank());
    }

    #[test]
    fn test_display_value_for_choice_uses_label() {
        let mut field = FormField::choice("country", "Country", countries());
        field.cycle_choice(true);
        assert_eq!(field.display_value(), "United States");
    }

    #[test]
    fn test_untagged_serialization() {
        let json = serde_json::to_string(&vec![
            FieldValue::Text("a".into()),
            FieldValue::List(vec!["b".into()]),
            FieldValue::Flag(true),
        ])
        .unwrap();
        assert_eq!(json, r#"["a",["b"],true]"#);
    }
}
