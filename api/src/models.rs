//! API models

use formforge_core::ValidationError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standard API response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ErrorResponse>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorResponse {
                code: code.to_string(),
                message: message.to_string(),
                field_errors: None,
                login_url: None,
            }),
        }
    }

    /// Per-field validation failure, every error carried inline.
    pub fn validation_failed(errors: Vec<ValidationError>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorResponse {
                code: "validation_failed".into(),
                message: "One or more fields are invalid.".into(),
                field_errors: Some(errors),
                login_url: None,
            }),
        }
    }

    /// Session required; the login URL preserves the requested path.
    pub fn unauthenticated(login_url: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorResponse {
                code: "unauthenticated".into(),
                message: "Sign in required.".into(),
                field_errors: None,
                login_url: Some(login_url),
            }),
        }
    }

    /// The generic retry-able write failure notice.
    pub fn write_failed() -> Self {
        Self::error("write_failed", "Something went wrong, please try again.")
    }
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    /// Per-field validation errors, when the code is `validation_failed`
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<Object>>)]
    pub field_errors: Option<Vec<ValidationError>>,
    /// Where to sign in, when the code is `unauthenticated`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_url: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Current session presence and presentation data
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub user: Option<formforge_core::SessionUser>,
}

/// Successful submission acknowledgement; `defaults` is the reset state the
/// form returns to.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitAccepted {
    pub message: String,
    #[schema(value_type = Object)]
    pub defaults: serde_json::Map<String, serde_json::Value>,
}
