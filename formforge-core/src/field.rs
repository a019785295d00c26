//! Field descriptor model and schema document shape

use serde::{Deserialize, Serialize};

use crate::{FormForgeError, Result};

/// Input type of a single form field.
///
/// Unknown or missing types deserialize as [`FieldType::Text`] so that a
/// drifted stored schema still renders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Email address input
    Email,
    /// Multi-line text input
    Textarea,
    /// Numeric input
    Number,
    /// Date input
    Date,
    /// Single choice from a fixed option list
    Select,
    /// Boolean toggle
    Checkbox,
    /// Single-line text input; also the catch-all for unrecognized types
    #[default]
    #[serde(other)]
    Text,
}

/// Schema definition of one form input.
///
/// `id` is the submission payload key and must be unique within a schema.
/// `order` drives display sequence via an ascending stable sort; it is not
/// guaranteed contiguous or unique at rest, so readers must tolerate
/// duplicates and gaps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Stable identifier, unique within a schema
    pub id: String,
    /// Input type
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    /// Display label
    pub label: String,
    /// Optional display hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Whether the validation contract rejects an absent value
    #[serde(default)]
    pub required: bool,
    /// Option list; meaningful only for `select` fields
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Display/iteration order
    #[serde(default)]
    pub order: u32,
}

/// Persisted form schema document.
///
/// The descriptor list is stored as a single JSON-serialized string under a
/// `schema` key, keyed by the fixed form identifier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// JSON-serialized array of [`FieldDescriptor`]
    pub schema: String,
}

impl SchemaDocument {
    /// Serialize a descriptor list into the stored document shape.
    pub fn encode(fields: &[FieldDescriptor]) -> Result<Self> {
        let schema = serde_json::to_string(fields)
            .map_err(|e| FormForgeError::MalformedSchema(e.to_string()))?;
        Ok(Self { schema })
    }

    /// Deserialize the stored descriptor list.
    ///
    /// A document that fails to parse is treated as an empty schema rather
    /// than propagated; the failure is logged.
    pub fn decode(&self) -> Vec<FieldDescriptor> {
        match serde_json::from_str(&self.schema) {
            Ok(fields) => fields,
            Err(e) => {
                tracing::warn!("malformed schema document, treating as empty: {e}");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor {
                id: "name".into(),
                field_type: FieldType::Text,
                label: "Name".into(),
                placeholder: Some("Your name".into()),
                required: true,
                options: vec![],
                order: 0,
            },
            FieldDescriptor {
                id: "topic".into(),
                field_type: FieldType::Select,
                label: "Topic".into(),
                placeholder: None,
                required: false,
                options: vec!["Sales".into(), "Support".into()],
                order: 1,
            },
        ]
    }

    #[test]
    fn test_schema_document_round_trip() {
        let fields = sample_fields();
        let doc = SchemaDocument::encode(&fields).unwrap();
        assert_eq!(doc.decode(), fields);
    }

    #[test]
    fn test_malformed_schema_decodes_empty() {
        let doc = SchemaDocument {
            schema: "{not json".into(),
        };
        assert!(doc.decode().is_empty());
    }

    #[test]
    fn test_missing_type_defaults_to_text() {
        let raw = r#"[{"id":"x","label":"X"}]"#;
        let fields: Vec<FieldDescriptor> = serde_json::from_str(raw).unwrap();
        assert_eq!(fields[0].field_type, FieldType::Text);
        assert!(!fields[0].required);
        assert!(fields[0].options.is_empty());
    }

    #[test]
    fn test_unknown_type_degrades_to_text() {
        let raw = r#"[{"id":"x","type":"signature","label":"X"}]"#;
        let fields: Vec<FieldDescriptor> = serde_json::from_str(raw).unwrap();
        assert_eq!(fields[0].field_type, FieldType::Text);
    }

    #[test]
    fn test_type_serializes_lowercase() {
        let fields = sample_fields();
        let json = serde_json::to_string(&fields).unwrap();
        assert!(json.contains(r#""type":"select""#));
    }
}
