//! Form renderer: descriptor list to a concrete widget plan
//!
//! The plan is what a client needs to draw the form: one widget per field in
//! display order, pre-populated defaults, and the form title and description
//! from the content record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::SiteContent;
use crate::engine::{default_values, normalize};
use crate::field::{FieldDescriptor, FieldType};

/// Concrete input widget implied by a field type.
///
/// Wire names match the field type names so a client can key widget
/// implementations off either.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Widget {
    /// Single-line text input
    #[serde(rename = "text")]
    TextInput,
    /// Email input
    #[serde(rename = "email")]
    EmailInput,
    /// Numeric input
    #[serde(rename = "number")]
    NumberInput,
    /// Date picker
    #[serde(rename = "date")]
    DateInput,
    /// Multi-line text area
    #[serde(rename = "textarea")]
    TextArea,
    /// Option dropdown
    #[serde(rename = "select")]
    Select,
    /// Boolean toggle
    #[serde(rename = "checkbox")]
    Checkbox,
}

impl From<FieldType> for Widget {
    fn from(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Text => Widget::TextInput,
            FieldType::Email => Widget::EmailInput,
            FieldType::Number => Widget::NumberInput,
            FieldType::Date => Widget::DateInput,
            FieldType::Textarea => Widget::TextArea,
            FieldType::Select => Widget::Select,
            FieldType::Checkbox => Widget::Checkbox,
        }
    }
}

/// One rendered input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldWidget {
    /// Field id, used as the submission payload key
    pub id: String,
    /// Widget to instantiate
    pub widget: Widget,
    /// Display label
    pub label: String,
    /// Optional display hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Whether the field is required
    pub required: bool,
    /// Options for select widgets; each entry is both value and label
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Initial value for an empty form
    pub default: Value,
}

/// Everything a client needs to draw the public form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPlan {
    /// Form title from the content record
    pub title: String,
    /// Form description from the content record
    pub description: String,
    /// Widgets in display order
    pub fields: Vec<FieldWidget>,
}

/// Map each normalized descriptor to its widget, pre-populated from the
/// engine's default values.
pub fn render_plan(fields: &[FieldDescriptor], content: &SiteContent) -> RenderPlan {
    let mut defaults = default_values(fields);
    let widgets = normalize(fields)
        .into_iter()
        .map(|f| FieldWidget {
            widget: Widget::from(f.field_type),
            default: defaults
                .remove(&f.id)
                .unwrap_or_else(|| Value::String(String::new())),
            id: f.id,
            label: f.label,
            placeholder: f.placeholder,
            required: f.required,
            options: f.options,
        })
        .collect();

    RenderPlan {
        title: content.form_title.clone(),
        description: content.form_description.clone(),
        fields: widgets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(id: &str, field_type: FieldType, order: u32) -> FieldDescriptor {
        FieldDescriptor {
            id: id.into(),
            field_type,
            label: id.into(),
            placeholder: None,
            required: false,
            options: vec![],
            order,
        }
    }

    #[test]
    fn test_plan_follows_normalized_order() {
        let fields = vec![
            field("second", FieldType::Textarea, 5),
            field("first", FieldType::Email, 1),
        ];
        let plan = render_plan(&fields, &SiteContent::default());

        let ids: Vec<_> = plan.fields.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["first", "second"]);
        assert_eq!(plan.fields[0].widget, Widget::EmailInput);
        assert_eq!(plan.fields[1].widget, Widget::TextArea);
    }

    #[test]
    fn test_plan_carries_content_copy() {
        let content = SiteContent {
            form_title: "Say Hi".into(),
            form_description: "We read everything.".into(),
            ..SiteContent::default()
        };
        let plan = render_plan(&[], &content);
        assert_eq!(plan.title, "Say Hi");
        assert_eq!(plan.description, "We read everything.");
        assert!(plan.fields.is_empty());
    }

    #[test]
    fn test_defaults_are_empty_strings() {
        let fields = vec![field("age", FieldType::Number, 0)];
        let plan = render_plan(&fields, &SiteContent::default());
        assert_eq!(plan.fields[0].default, Value::String(String::new()));
    }

    #[test]
    fn test_widget_wire_names_match_field_types() {
        let fields = vec![
            field("name", FieldType::Text, 0),
            field("note", FieldType::Textarea, 1),
        ];
        let plan = render_plan(&fields, &SiteContent::default());
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["fields"][0]["widget"], "text");
        assert_eq!(json["fields"][1]["widget"], "textarea");
    }

    #[test]
    fn test_select_without_options_renders_empty_list() {
        let fields = vec![field("topic", FieldType::Select, 0)];
        let plan = render_plan(&fields, &SiteContent::default());
        assert_eq!(plan.fields[0].widget, Widget::Select);
        assert!(plan.fields[0].options.is_empty());
    }
}
