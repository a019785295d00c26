//! Landing page content record

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Flat site copy record, overwritten wholesale on save (last writer wins).
///
/// Serialized field names match the stored document shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    /// Hero headline
    pub headline: String,
    /// Hero description
    pub description: String,
    /// Hero image URL, expected to be well-formed http(s)
    pub image: String,
    /// Title shown above the contact form
    pub form_title: String,
    /// Description shown above the contact form
    pub form_description: String,
}

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            headline: "Create Engaging Forms, Effortlessly".into(),
            description: "Our dynamic form builder lets you create, manage, and \
                deploy custom forms in minutes. Discover how FormForge can \
                revolutionize your data collection."
                .into(),
            image: "https://picsum.photos/seed/formforge-hero/1200/800".into(),
            form_title: "Get in Touch".into(),
            form_description: "Fill out the form below and we will get back to you.".into(),
        }
    }
}

impl SiteContent {
    /// Edit-time checks: all five fields non-empty, image a well-formed
    /// http(s) URL.
    pub fn validate(&self) -> std::result::Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let required = [
            ("headline", &self.headline, "Headline is required."),
            ("description", &self.description, "Description is required."),
            ("image", &self.image, "Image URL is required."),
            ("formTitle", &self.form_title, "Form title is required."),
            (
                "formDescription",
                &self.form_description,
                "Form description is required.",
            ),
        ];
        for (field_id, value, message) in required {
            if value.trim().is_empty() {
                errors.push(ValidationError::new(field_id, message));
            }
        }
        if !self.image.trim().is_empty() && !is_http_url(&self.image) {
            errors.push(ValidationError::new("image", "Must be a valid URL."));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn is_http_url(value: &str) -> bool {
    let rest = match value.strip_prefix("https://") {
        Some(rest) => rest,
        None => match value.strip_prefix("http://") {
            Some(rest) => rest,
            None => return false,
        },
    };
    !rest.is_empty() && !rest.starts_with('/') && !value.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_content_is_valid() {
        assert!(SiteContent::default().validate().is_ok());
    }

    #[test]
    fn test_empty_fields_rejected() {
        let content = SiteContent {
            headline: String::new(),
            form_title: "  ".into(),
            ..SiteContent::default()
        };
        let errors = content.validate().unwrap_err();
        let ids: Vec<_> = errors.iter().map(|e| e.field_id.as_str()).collect();
        assert_eq!(ids, ["headline", "formTitle"]);
    }

    #[test]
    fn test_image_must_be_http_url() {
        for bad in ["ftp://example.com/x.png", "example.com/x.png", "https://", "https://a b"] {
            let content = SiteContent {
                image: bad.into(),
                ..SiteContent::default()
            };
            let errors = content.validate().unwrap_err();
            assert_eq!(errors[0].field_id, "image", "accepted {bad}");
        }

        let content = SiteContent {
            image: "http://example.com/hero.png".into(),
            ..SiteContent::default()
        };
        assert!(content.validate().is_ok());
    }

    #[test]
    fn test_serialized_shape_uses_camel_case() {
        let json = serde_json::to_value(SiteContent::default()).unwrap();
        assert!(json.get("formTitle").is_some());
        assert!(json.get("formDescription").is_some());
    }
}
