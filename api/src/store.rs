//! In-memory document store
//!
//! Stands in for the external document database in development and tests,
//! with the same consistency model: wholesale single-document overwrites
//! with no version checks (last writer wins), and an append-only submission
//! log with store-assigned ids and timestamps.

use async_trait::async_trait;
use chrono::Utc;
use formforge_core::{DocumentStore, Result, SchemaDocument, SiteContent, SubmissionRecord};
use parking_lot::RwLock;
use serde_json::{Map, Value};
use uuid::Uuid;

/// In-memory document store for the single fixed form.
pub struct MemoryStore {
    form_id: String,
    schema: RwLock<Option<SchemaDocument>>,
    content: RwLock<Option<SiteContent>>,
    submissions: RwLock<Vec<SubmissionRecord>>,
}

impl MemoryStore {
    /// Create an empty store scoped to one form.
    pub fn new(form_id: impl Into<String>) -> Self {
        Self {
            form_id: form_id.into(),
            schema: RwLock::new(None),
            content: RwLock::new(None),
            submissions: RwLock::new(Vec::new()),
        }
    }

    /// Number of stored submissions.
    pub fn submission_count(&self) -> usize {
        self.submissions.read().len()
    }

    /// Plant a raw schema document, bypassing encoding. Lets tests stage
    /// documents a well-behaved writer would never produce.
    pub fn set_raw_schema(&self, doc: SchemaDocument) {
        *self.schema.write() = Some(doc);
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn read_schema(&self) -> Result<Option<SchemaDocument>> {
        Ok(self.schema.read().clone())
    }

    async fn write_schema(&self, doc: &SchemaDocument) -> Result<()> {
        *self.schema.write() = Some(doc.clone());
        tracing::info!(form_id = %self.form_id, "schema document overwritten");
        Ok(())
    }

    async fn read_content(&self) -> Result<Option<SiteContent>> {
        Ok(self.content.read().clone())
    }

    async fn write_content(&self, content: &SiteContent) -> Result<()> {
        *self.content.write() = Some(content.clone());
        tracing::info!("site content overwritten");
        Ok(())
    }

    async fn append_submission(&self, data: Map<String, Value>) -> Result<SubmissionRecord> {
        let record = SubmissionRecord {
            id: Uuid::new_v4().to_string(),
            form_data: data,
            submission_date: Some(Utc::now()),
        };
        self.submissions.write().push(record.clone());
        tracing::info!(form_id = %self.form_id, id = %record.id, "submission appended");
        Ok(record)
    }

    async fn list_submissions(&self) -> Result<Vec<SubmissionRecord>> {
        let mut records = self.submissions.read().clone();
        records.sort_by(|a, b| b.submission_date.cmp(&a.submission_date));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(name: &str) -> Map<String, Value> {
        [("name".to_string(), json!(name))].into_iter().collect()
    }

    #[tokio::test]
    async fn test_submissions_listed_newest_first() {
        let store = MemoryStore::new("main_contact_form");
        let first = store.append_submission(payload("first")).await.unwrap();
        let second = store.append_submission(payload("second")).await.unwrap();
        assert!(first.submission_date <= second.submission_date);

        let listed = store.list_submissions().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].form_data["name"], json!("second"));
        assert_eq!(listed[1].form_data["name"], json!("first"));
    }

    #[tokio::test]
    async fn test_schema_overwrite_is_wholesale() {
        let store = MemoryStore::new("main_contact_form");
        assert!(store.read_schema().await.unwrap().is_none());

        let doc = SchemaDocument { schema: "[]".into() };
        store.write_schema(&doc).await.unwrap();
        let replacement = SchemaDocument {
            schema: r#"[{"id":"x","label":"X"}]"#.into(),
        };
        store.write_schema(&replacement).await.unwrap();

        assert_eq!(store.read_schema().await.unwrap(), Some(replacement));
    }
}
