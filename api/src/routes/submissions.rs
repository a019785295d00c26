//! Submission pipeline endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use formforge_core::{default_values, store, SessionUser, Submission, ValidationContract};
use serde_json::{Map, Value};

use crate::{
    models::{ApiResponse, SubmitAccepted},
    ApiState,
};

/// Validate a filled form against the current schema and append it to the
/// submission log.
#[utoipa::path(
    post,
    path = "/api/v1/submissions",
    responses(
        (status = 200, description = "Submission accepted", body = SubmitAccepted),
        (status = 400, description = "Per-field validation errors"),
        (status = 502, description = "Store write failed")
    ),
    tag = "submissions"
)]
pub async fn submit(
    State(state): State<Arc<ApiState>>,
    Json(values): Json<Map<String, Value>>,
) -> (StatusCode, Json<ApiResponse<SubmitAccepted>>) {
    let fields = store::load_schema(state.store.as_ref()).await;
    let contract = ValidationContract::build(&fields);

    let accepted = match contract.validate(&values) {
        Ok(accepted) => accepted,
        Err(errors) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::validation_failed(errors)),
            );
        }
    };

    match state.store.append_submission(accepted).await {
        Ok(record) => {
            tracing::info!(id = %record.id, "form submitted");
            (
                StatusCode::OK,
                Json(ApiResponse::success(SubmitAccepted {
                    message: "Your form has been submitted.".into(),
                    defaults: default_values(&fields),
                })),
            )
        }
        Err(e) => {
            tracing::error!("submission write failed: {e}");
            (StatusCode::BAD_GATEWAY, Json(ApiResponse::write_failed()))
        }
    }
}

/// All submissions for the fixed form, newest first.
///
/// A failed read is served as an empty list rather than an error.
#[utoipa::path(
    get,
    path = "/api/v1/admin/submissions",
    responses(
        (status = 200, description = "Submissions, newest first"),
        (status = 401, description = "Sign in required")
    ),
    tag = "submissions"
)]
pub async fn list_submissions(
    State(state): State<Arc<ApiState>>,
    Extension(admin): Extension<SessionUser>,
) -> Json<ApiResponse<Vec<Submission>>> {
    let submissions = match state.store.list_submissions().await {
        Ok(records) => records.into_iter().map(Submission::from).collect(),
        Err(e) => {
            tracing::error!("submission list failed, serving empty list: {e}");
            Vec::new()
        }
    };
    tracing::debug!(
        admin = admin.email.as_deref().unwrap_or("unknown"),
        count = submissions.len(),
        "submissions listed"
    );
    Json(ApiResponse::success(submissions))
}
