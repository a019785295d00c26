//! FormForge Dynamic Form Engine
//!
//! Schema model, validation, and content handling for a dynamically
//! configurable contact form with an admin editing surface.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         FORMFORGE CORE                                  │
//! │                                                                         │
//! │  ┌──────────────┐      ┌───────────────────────────────────────────┐   │
//! │  │    FIELD     │─────▶│              SCHEMA ENGINE                │   │
//! │  │  DESCRIPTOR  │      │  Normalize | Validation Contract | Defaults│   │
//! │  └──────────────┘      └──────────┬────────────────────────────────┘   │
//! │                                   │                                    │
//! │  ┌──────────────┐      ┌──────────▼────────────┐  ┌────────────────┐  │
//! │  │   SCHEMA     │      │     FORM RENDERER     │  │   SUBMISSION   │  │
//! │  │   EDITOR     │      │  Descriptor → Widget  │  │    PIPELINE    │  │
//! │  └──────┬───────┘      └───────────────────────┘  └───────┬────────┘  │
//! │         │                                                 │           │
//! │  ┌──────▼─────────────────────────────────────────────────▼────────┐  │
//! │  │                       DOCUMENT STORE (trait)                    │  │
//! │  │      Schema Doc | Site Content | Append-Only Submission Log     │  │
//! │  └─────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐  │
//! │  │                SESSION GATE (auth state subscription)            │  │
//! │  └─────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![allow(dead_code)]

pub mod content;
pub mod editor;
pub mod engine;
pub mod field;
pub mod gate;
pub mod render;
pub mod store;
pub mod submission;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use content::SiteContent;
pub use editor::{Direction, EditorState, FieldDraft, SchemaEditor};
pub use engine::{default_values, normalize, ValidationContract};
pub use field::{FieldDescriptor, FieldType, SchemaDocument};
pub use gate::{AuthState, GateDecision, SessionGate, SessionUser};
pub use render::{render_plan, RenderPlan};
pub use store::DocumentStore;
pub use submission::{Submission, SubmissionRecord};

/// A single per-field validation failure.
///
/// Collected, never fatal; surfaced inline next to the offending field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{field_id}: {message}")]
pub struct ValidationError {
    /// Id of the field descriptor the value was validated against.
    pub field_id: String,
    /// Human-readable message, e.g. `"Email is required."`.
    pub message: String,
}

impl ValidationError {
    /// Build a validation error for a field.
    pub fn new(field_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            message: message.into(),
        }
    }

    /// The standard missing-value message for a required field.
    pub fn required(field_id: impl Into<String>, label: &str) -> Self {
        Self::new(field_id, format!("{label} is required."))
    }
}

/// FormForge error type
///
/// Per-field validation failures travel as `Vec<ValidationError>` rather
/// than through this enum; these are the fatal paths.
#[derive(Debug, Error)]
pub enum FormForgeError {
    /// External store read/write failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// A stored schema document failed to serialize or deserialize.
    #[error("malformed schema document: {0}")]
    MalformedSchema(String),
}

/// Result type for FormForge
pub type Result<T> = std::result::Result<T, FormForgeError>;
