//! Public form render plan

use std::sync::Arc;

use axum::{extract::State, Json};
use formforge_core::{render_plan, store, RenderPlan};

use crate::{models::ApiResponse, ApiState};

/// Widgets, defaults, and copy for drawing the public contact form
#[utoipa::path(
    get,
    path = "/api/v1/form",
    responses((status = 200, description = "Render plan for the public form")),
    tag = "form"
)]
pub async fn get_form(State(state): State<Arc<ApiState>>) -> Json<ApiResponse<RenderPlan>> {
    let fields = store::load_schema(state.store.as_ref()).await;
    let content = store::load_content(state.store.as_ref()).await;
    Json(ApiResponse::success(render_plan(&fields, &content)))
}
