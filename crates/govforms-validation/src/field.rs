//! Field identity and change events

use nutype::nutype;
use serde::{Deserialize, Serialize};

/// Separator between the tokens of a field name (`resource_ref_number`).
pub const TOKEN_DELIMITER: char = '_';

/// Token marking an open-ended custom key (`extras__0__value`).
pub const EXTRAS_TOKEN: &str = "extras";

/// Name of a form control as it appears in the `name` attribute.
///
/// Surrounding whitespace is trimmed. Empty names and names containing
/// whitespace or control characters are rejected; the engine skips such
/// fields instead of failing the batch.
///
/// ```
/// use govforms_validation::FieldName;
///
/// let name = FieldName::try_new("resource_ref_number").unwrap();
/// assert_eq!(name.tokens().count(), 3);
/// assert!(FieldName::try_new("  ").is_err());
/// ```
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 256, predicate = is_valid_field_name),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        Hash,
        AsRef,
        TryFrom,
        Deref,
        Display,
        Serialize,
        Deserialize,
    )
)]
pub struct FieldName(String);

fn is_valid_field_name(s: &str) -> bool {
    !s.chars().any(|c| c.is_whitespace() || c.is_control())
}

impl FieldName {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }

    /// Tokens of the name split on [`TOKEN_DELIMITER`]. Empty tokens are kept.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.as_str().split(TOKEN_DELIMITER)
    }

    /// Whether any token is the extras marker.
    pub fn is_extras_key(&self) -> bool {
        self.tokens().any(|token| token == EXTRAS_TOKEN)
    }
}

/// Kind of element that raised the change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Input,
    Textarea,
    Select,
}

/// A "field changed" notification from the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEvent {
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub kind: FieldKind,
}

impl FieldEvent {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind: FieldKind::Input,
        }
    }

    pub fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Per-dispatch context derived from the form configuration and the field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldContext {
    pub is_resource_form: bool,
    pub is_extras_key: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_name_trims_and_rejects_blank() {
        let name = FieldName::try_new("  title ").unwrap();
        assert_eq!(name.as_str(), "title");
        assert!(FieldName::try_new("").is_err());
        assert!(FieldName::try_new("   ").is_err());
    }

    #[test]
    fn test_field_name_rejects_inner_whitespace() {
        assert!(FieldName::try_new("tag string").is_err());
        assert!(FieldName::try_new("tag\tstring").is_err());
    }

    #[test]
    fn test_extras_detection() {
        assert!(FieldName::try_new("extras__0__key").unwrap().is_extras_key());
        assert!(FieldName::try_new("pkg_extras_region").unwrap().is_extras_key());
        assert!(!FieldName::try_new("extrasx").unwrap().is_extras_key());
    }

    #[test]
    fn test_event_deserializes_with_defaults() {
        let event: FieldEvent = serde_json::from_str(r#"{"name":"notes"}"#).unwrap();
        assert_eq!(event.value, "");
        assert_eq!(event.kind, FieldKind::Input);

        let event: FieldEvent =
            serde_json::from_str(r#"{"name":"notes","value":"x","kind":"textarea"}"#).unwrap();
        assert_eq!(event.kind, FieldKind::Textarea);
    }
}
