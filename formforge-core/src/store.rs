//! Document store seam
//!
//! Persistence is delegated to an external document database; this trait is
//! the injected capability components persist through. Writes are single
//! atomic document operations with no cross-client coordination (last
//! writer wins); the submission log is append-only.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::content::SiteContent;
use crate::engine::normalize;
use crate::field::{FieldDescriptor, SchemaDocument};
use crate::submission::SubmissionRecord;
use crate::Result;

/// External document database boundary.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read the schema document for the fixed form, if present.
    async fn read_schema(&self) -> Result<Option<SchemaDocument>>;

    /// Overwrite the schema document wholesale.
    async fn write_schema(&self, doc: &SchemaDocument) -> Result<()>;

    /// Read the site content record, if present.
    async fn read_content(&self) -> Result<Option<SiteContent>>;

    /// Overwrite the site content record wholesale.
    async fn write_content(&self, content: &SiteContent) -> Result<()>;

    /// Append one submission; the store assigns id and timestamp.
    async fn append_submission(&self, data: Map<String, Value>) -> Result<SubmissionRecord>;

    /// All submissions for the fixed form, newest first.
    async fn list_submissions(&self) -> Result<Vec<SubmissionRecord>>;
}

/// Read the current schema in display order.
///
/// Read failures and malformed documents fall back to the empty schema
/// silently; the caller is not told a fallback was substituted.
pub async fn load_schema(store: &dyn DocumentStore) -> Vec<FieldDescriptor> {
    match store.read_schema().await {
        Ok(Some(doc)) => normalize(&doc.decode()),
        Ok(None) => Vec::new(),
        Err(e) => {
            tracing::error!("schema read failed, serving empty schema: {e}");
            Vec::new()
        }
    }
}

/// Read the current site content, substituting the built-in default when
/// the record is absent or unreadable.
pub async fn load_content(store: &dyn DocumentStore) -> SiteContent {
    match store.read_content().await {
        Ok(Some(content)) => content,
        Ok(None) => SiteContent::default(),
        Err(e) => {
            tracing::error!("content read failed, serving defaults: {e}");
            SiteContent::default()
        }
    }
}
