//! Site content endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use formforge_core::{store, SiteContent};

use crate::{models::ApiResponse, ApiState};

/// Current site content, substituting built-in defaults when the record is
/// absent or unreadable.
#[utoipa::path(
    get,
    path = "/api/v1/content",
    responses((status = 200, description = "Current site content")),
    tag = "content"
)]
pub async fn get_content(State(state): State<Arc<ApiState>>) -> Json<ApiResponse<SiteContent>> {
    let content = store::load_content(state.store.as_ref()).await;
    Json(ApiResponse::success(content))
}

/// Overwrite the site content record wholesale
#[utoipa::path(
    put,
    path = "/api/v1/admin/content",
    responses(
        (status = 200, description = "Content saved"),
        (status = 400, description = "One or more fields invalid"),
        (status = 401, description = "Sign in required"),
        (status = 502, description = "Store write failed")
    ),
    tag = "content"
)]
pub async fn update_content(
    State(state): State<Arc<ApiState>>,
    Json(content): Json<SiteContent>,
) -> (StatusCode, Json<ApiResponse<SiteContent>>) {
    if let Err(errors) = content.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::validation_failed(errors)),
        );
    }

    match state.store.write_content(&content).await {
        Ok(()) => (StatusCode::OK, Json(ApiResponse::success(content))),
        Err(e) => {
            tracing::error!("content write failed: {e}");
            (StatusCode::BAD_GATEWAY, Json(ApiResponse::write_failed()))
        }
    }
}
