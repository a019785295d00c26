//! Form schema endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use formforge_core::{editor, store, FieldDescriptor, SchemaDocument};

use crate::{models::ApiResponse, ApiState};

/// Current field schema in display order.
///
/// A missing, unreadable, or malformed schema document is served as an
/// empty schema.
#[utoipa::path(
    get,
    path = "/api/v1/schema",
    responses((status = 200, description = "Field descriptors in display order")),
    tag = "schema"
)]
pub async fn get_schema(
    State(state): State<Arc<ApiState>>,
) -> Json<ApiResponse<Vec<FieldDescriptor>>> {
    let fields = store::load_schema(state.store.as_ref()).await;
    Json(ApiResponse::success(fields))
}

/// Overwrite the schema document wholesale
#[utoipa::path(
    put,
    path = "/api/v1/admin/schema",
    responses(
        (status = 200, description = "Schema saved"),
        (status = 400, description = "Edit-time constraints violated"),
        (status = 401, description = "Sign in required"),
        (status = 502, description = "Store write failed")
    ),
    tag = "schema"
)]
pub async fn update_schema(
    State(state): State<Arc<ApiState>>,
    Json(fields): Json<Vec<FieldDescriptor>>,
) -> (StatusCode, Json<ApiResponse<Vec<FieldDescriptor>>>) {
    let errors = editor::validate_fields(&fields);
    if !errors.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::validation_failed(errors)),
        );
    }

    let doc = match SchemaDocument::encode(&fields) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::error!("schema encode failed: {e}");
            return (StatusCode::BAD_GATEWAY, Json(ApiResponse::write_failed()));
        }
    };

    match state.store.write_schema(&doc).await {
        Ok(()) => (StatusCode::OK, Json(ApiResponse::success(fields))),
        Err(e) => {
            tracing::error!("schema write failed: {e}");
            (StatusCode::BAD_GATEWAY, Json(ApiResponse::write_failed()))
        }
    }
}
