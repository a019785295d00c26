//! Session observation endpoint

use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, Json};
use formforge_core::AuthState;

use crate::{
    middleware::session::observe,
    models::{ApiResponse, SessionResponse},
    ApiState,
};

/// Current session presence and the signed-in user's presentation data
#[utoipa::path(
    get,
    path = "/api/v1/session",
    responses((status = 200, description = "Session state", body = SessionResponse)),
    tag = "session"
)]
pub async fn get_session(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
) -> Json<ApiResponse<SessionResponse>> {
    let response = match observe(&state, &headers) {
        AuthState::Authenticated(user) => SessionResponse {
            authenticated: true,
            user: Some(user),
        },
        _ => SessionResponse {
            authenticated: false,
            user: None,
        },
    };
    Json(ApiResponse::success(response))
}
