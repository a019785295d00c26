//! Admin-facing schema editor
//!
//! A state machine over a single in-memory field list: Clean (matches the
//! persisted version), Dirty (local edits pending), Saving (persist in
//! flight). Edits apply in invocation order; `save` persists the full
//! accumulated state, not a diff. Single-flight of concurrent saves is the
//! caller's responsibility.

use chrono::Utc;

use crate::engine::normalize;
use crate::field::{FieldDescriptor, FieldType, SchemaDocument};
use crate::store::DocumentStore;
use crate::{Result, ValidationError};

/// Editor lifecycle state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditorState {
    /// In-memory list matches the persisted version
    #[default]
    Clean,
    /// Local edits pending
    Dirty,
    /// Persist in flight
    Saving,
}

/// Direction for [`SchemaEditor::reorder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Move the field earlier in display order
    Up,
    /// Move the field later in display order
    Down,
}

/// Editable attributes of a field; id and order are assigned by the editor.
#[derive(Clone, Debug, Default)]
pub struct FieldDraft {
    /// Input type
    pub field_type: FieldType,
    /// Display label
    pub label: String,
    /// Optional display hint
    pub placeholder: Option<String>,
    /// Requiredness
    pub required: bool,
    /// Option list for `select` fields
    pub options: Vec<String>,
}

/// In-memory editor over one form schema.
#[derive(Debug, Default)]
pub struct SchemaEditor {
    fields: Vec<FieldDescriptor>,
    state: EditorState,
}

impl SchemaEditor {
    /// Open an editor over the persisted field list.
    pub fn new(initial: Vec<FieldDescriptor>) -> Self {
        Self {
            fields: normalize(&initial),
            state: EditorState::Clean,
        }
    }

    /// Current field list, in display order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EditorState {
        self.state
    }

    /// Append a new field.
    ///
    /// The id is derived from the label plus a uniqueness suffix; the order
    /// is one past the current maximum (0 for an empty schema).
    pub fn add_field(&mut self, draft: FieldDraft) -> &FieldDescriptor {
        let id = self.unique_id(&draft.label);
        let order = self
            .fields
            .iter()
            .map(|f| f.order)
            .max()
            .map_or(0, |max| max + 1);

        self.fields.push(FieldDescriptor {
            id,
            field_type: draft.field_type,
            label: draft.label,
            placeholder: draft.placeholder,
            required: draft.required,
            options: draft.options,
            order,
        });
        self.state = EditorState::Dirty;
        self.fields.last().expect("field was just pushed")
    }

    /// Replace the attributes of the field with the given id, keeping its id
    /// and order. No-op when the id is unknown.
    pub fn edit_field(&mut self, id: &str, draft: FieldDraft) -> bool {
        match self.fields.iter_mut().find(|f| f.id == id) {
            Some(field) => {
                field.field_type = draft.field_type;
                field.label = draft.label;
                field.placeholder = draft.placeholder;
                field.required = draft.required;
                field.options = draft.options;
                self.state = EditorState::Dirty;
                true
            }
            None => false,
        }
    }

    /// Remove the field with the given id.
    ///
    /// Remaining fields keep their order values; the resulting sequence may
    /// be non-contiguous but stays strictly ordered.
    pub fn delete_field(&mut self, id: &str) -> bool {
        let before = self.fields.len();
        self.fields.retain(|f| f.id != id);
        if self.fields.len() < before {
            self.state = EditorState::Dirty;
            true
        } else {
            false
        }
    }

    /// Swap the order value of a field with its immediate neighbor in
    /// normalized order. No-op at the boundaries.
    pub fn reorder(&mut self, id: &str, direction: Direction) -> bool {
        let Some(index) = self.fields.iter().position(|f| f.id == id) else {
            return false;
        };
        let target = match direction {
            Direction::Up if index > 0 => index - 1,
            Direction::Down if index + 1 < self.fields.len() => index + 1,
            _ => return false,
        };

        let order = self.fields[index].order;
        self.fields[index].order = self.fields[target].order;
        self.fields[target].order = order;
        self.fields.sort_by_key(|f| f.order);
        self.state = EditorState::Dirty;
        true
    }

    /// Persist the accumulated field list wholesale.
    ///
    /// Dirty/Clean → Saving → Clean on success; back to Dirty on failure
    /// with edits preserved.
    pub async fn save(&mut self, store: &dyn DocumentStore) -> Result<()> {
        self.state = EditorState::Saving;
        let doc = match SchemaDocument::encode(&self.fields) {
            Ok(doc) => doc,
            Err(e) => {
                self.state = EditorState::Dirty;
                return Err(e);
            }
        };
        match store.write_schema(&doc).await {
            Ok(()) => {
                self.state = EditorState::Clean;
                Ok(())
            }
            Err(e) => {
                self.state = EditorState::Dirty;
                Err(e)
            }
        }
    }

    fn unique_id(&self, label: &str) -> String {
        let base = format!("{}_{}", slugify(label), Utc::now().timestamp_millis());
        let mut candidate = base.clone();
        let mut bump = 0u32;
        while self.fields.iter().any(|f| f.id == candidate) {
            bump += 1;
            candidate = format!("{base}_{bump}");
        }
        candidate
    }
}

/// Lowercase the label and collapse whitespace runs into underscores.
fn slugify(label: &str) -> String {
    label
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Edit-time constraint checks applied before a schema is persisted:
/// non-empty labels, unique non-empty ids, options present on `select`
/// fields.
pub fn validate_fields(fields: &[FieldDescriptor]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (index, field) in fields.iter().enumerate() {
        if field.id.trim().is_empty() {
            errors.push(ValidationError::new(
                format!("field_{index}"),
                "Field id is required.",
            ));
        }
        if field.label.trim().is_empty() {
            errors.push(ValidationError::new(&field.id, "Label is required."));
        }
        if fields[..index].iter().any(|f| f.id == field.id) {
            errors.push(ValidationError::new(
                &field.id,
                format!("Duplicate field id: {}.", field.id),
            ));
        }
        if field.field_type == FieldType::Select && field.options.is_empty() {
            errors.push(ValidationError::new(
                &field.id,
                "Select fields need at least one option.",
            ));
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FormForgeError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn draft(label: &str, field_type: FieldType) -> FieldDraft {
        FieldDraft {
            field_type,
            label: label.into(),
            ..FieldDraft::default()
        }
    }

    fn editor_with(labels: &[&str]) -> SchemaEditor {
        let mut editor = SchemaEditor::default();
        for label in labels {
            editor.add_field(draft(label, FieldType::Text));
        }
        editor
    }

    #[test]
    fn test_add_field_to_empty_schema() {
        let mut editor = SchemaEditor::default();
        let field = editor.add_field(draft("Full Name", FieldType::Text));

        assert!(field.id.starts_with("full_name_"));
        assert_eq!(field.order, 0);
        assert_eq!(editor.state(), EditorState::Dirty);
    }

    #[test]
    fn test_add_field_order_is_max_plus_one() {
        let mut editor = editor_with(&["One", "Two"]);
        let first = editor.fields()[0].id.clone();
        editor.delete_field(&first);

        let field = editor.add_field(draft("Three", FieldType::Text));
        // Max surviving order is 1, so the new field lands at 2.
        assert_eq!(field.order, 2);
    }

    #[test]
    fn test_edit_field_unknown_id_is_noop() {
        let mut editor = SchemaEditor::new(vec![]);
        assert!(!editor.edit_field("ghost", draft("Ghost", FieldType::Text)));
        assert_eq!(editor.state(), EditorState::Clean);
    }

    #[test]
    fn test_edit_field_keeps_id_and_order() {
        let mut editor = editor_with(&["Name"]);
        let id = editor.fields()[0].id.clone();
        let order = editor.fields()[0].order;

        assert!(editor.edit_field(&id, draft("Renamed", FieldType::Textarea)));
        let field = &editor.fields()[0];
        assert_eq!(field.id, id);
        assert_eq!(field.order, order);
        assert_eq!(field.label, "Renamed");
        assert_eq!(field.field_type, FieldType::Textarea);
    }

    #[test]
    fn test_delete_field() {
        let mut editor = editor_with(&["One", "Two", "Three"]);
        let id = editor.fields()[1].id.clone();
        let kept: Vec<_> = editor
            .fields()
            .iter()
            .filter(|f| f.id != id)
            .cloned()
            .collect();

        assert!(editor.delete_field(&id));
        assert_eq!(editor.fields().len(), 2);
        assert!(editor.fields().iter().all(|f| f.id != id));
        assert_eq!(editor.fields(), kept.as_slice());
    }

    #[test]
    fn test_delete_does_not_renumber() {
        let mut editor = editor_with(&["One", "Two", "Three"]);
        let id = editor.fields()[0].id.clone();
        editor.delete_field(&id);

        let orders: Vec<_> = editor.fields().iter().map(|f| f.order).collect();
        assert_eq!(orders, [1, 2]);
    }

    #[test]
    fn test_reorder_swaps_neighbors() {
        let mut editor = editor_with(&["One", "Two"]);
        let second = editor.fields()[1].id.clone();

        assert!(editor.reorder(&second, Direction::Up));
        assert_eq!(editor.fields()[0].id, second);
        assert_eq!(editor.fields()[0].order, 0);
        assert_eq!(editor.fields()[1].order, 1);
    }

    #[test]
    fn test_reorder_boundary_is_noop() {
        let mut editor = editor_with(&["One", "Two"]);
        let first = editor.fields()[0].id.clone();
        let last = editor.fields()[1].id.clone();
        let before: Vec<_> = editor.fields().to_vec();

        assert!(!editor.reorder(&first, Direction::Up));
        assert!(!editor.reorder(&last, Direction::Down));
        assert_eq!(editor.fields(), before.as_slice());
    }

    #[test]
    fn test_unique_id_suffix_on_collision() {
        let mut editor = SchemaEditor::default();
        let first = editor.add_field(draft("Name", FieldType::Text)).id.clone();
        let second = editor.add_field(draft("Name", FieldType::Text)).id.clone();
        assert_ne!(first, second);
    }

    #[test]
    fn test_validate_fields() {
        let mut fields = vec![
            FieldDescriptor {
                id: "name".into(),
                field_type: FieldType::Text,
                label: "Name".into(),
                placeholder: None,
                required: true,
                options: vec![],
                order: 0,
            },
            FieldDescriptor {
                id: "name".into(),
                field_type: FieldType::Select,
                label: String::new(),
                placeholder: None,
                required: false,
                options: vec![],
                order: 1,
            },
        ];
        let errors = validate_fields(&fields);
        // Empty label, duplicate id, and missing select options.
        assert_eq!(errors.len(), 3);

        fields.pop();
        assert!(validate_fields(&fields).is_empty());
    }

    /// Store stub that fails writes on demand.
    #[derive(Default)]
    struct FlakyStore {
        fail: AtomicBool,
        saved: std::sync::Mutex<Option<SchemaDocument>>,
    }

    #[async_trait]
    impl DocumentStore for FlakyStore {
        async fn read_schema(&self) -> crate::Result<Option<SchemaDocument>> {
            Ok(self.saved.lock().unwrap().clone())
        }
        async fn write_schema(&self, doc: &SchemaDocument) -> crate::Result<()> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(FormForgeError::Storage("write refused".into()));
            }
            *self.saved.lock().unwrap() = Some(doc.clone());
            Ok(())
        }
        async fn read_content(&self) -> crate::Result<Option<crate::SiteContent>> {
            Ok(None)
        }
        async fn write_content(&self, _content: &crate::SiteContent) -> crate::Result<()> {
            Ok(())
        }
        async fn append_submission(
            &self,
            _data: serde_json::Map<String, serde_json::Value>,
        ) -> crate::Result<crate::SubmissionRecord> {
            Err(FormForgeError::Storage("not a submission store".into()))
        }
        async fn list_submissions(&self) -> crate::Result<Vec<crate::SubmissionRecord>> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn test_save_success_transitions_to_clean() {
        let store = FlakyStore::default();
        let mut editor = editor_with(&["Name"]);
        assert_eq!(editor.state(), EditorState::Dirty);

        editor.save(&store).await.unwrap();
        assert_eq!(editor.state(), EditorState::Clean);
        let saved = store.saved.lock().unwrap().clone().unwrap();
        assert_eq!(saved.decode(), editor.fields());
    }

    #[tokio::test]
    async fn test_save_failure_preserves_edits() {
        let store = FlakyStore {
            fail: AtomicBool::new(true),
            ..FlakyStore::default()
        };
        let mut editor = editor_with(&["Name"]);
        let before = editor.fields().to_vec();

        assert!(editor.save(&store).await.is_err());
        assert_eq!(editor.state(), EditorState::Dirty);
        assert_eq!(editor.fields(), before.as_slice());
    }
}
