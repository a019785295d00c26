//! FormForge API
//!
//! Landing page + admin dashboard backend for one dynamically configurable
//! contact form.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          FORMFORGE API                                  │
//! │                                                                         │
//! │  PUBLIC                              ADMIN (session gated)              │
//! │  ┌─────────────────────────┐         ┌────────────────────────────┐    │
//! │  │ GET  /content           │         │ PUT /admin/content         │    │
//! │  │ GET  /schema            │         │ PUT /admin/schema          │    │
//! │  │ GET  /form              │         │ GET /admin/submissions     │    │
//! │  │ GET  /session           │         └──────────────┬─────────────┘    │
//! │  │ POST /submissions       │                        │                  │
//! │  └────────────┬────────────┘         ┌──────────────▼─────────────┐    │
//! │               │                      │     SESSION MIDDLEWARE     │    │
//! │  ┌────────────▼────────────────────┐ │  Bearer JWT → Session Gate │    │
//! │  │        FORMFORGE CORE           │ └────────────────────────────┘    │
//! │  │ Schema Engine | Editor | Content│                                   │
//! │  └────────────┬────────────────────┘                                   │
//! │  ┌────────────▼────────────────────────────────────────────────────┐   │
//! │  │              DOCUMENT STORE (external collaborator)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![allow(dead_code)]

pub mod config;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use formforge_core::DocumentStore;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::middleware::session::SessionProvider;

pub use config::ServerConfig;
pub use models::*;
pub use store::MemoryStore;

/// API state
pub struct ApiState {
    /// Server configuration
    pub config: ServerConfig,
    /// Document database boundary
    pub store: Arc<dyn DocumentStore>,
    /// Identity provider boundary
    pub sessions: Arc<dyn SessionProvider>,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "FormForge API",
        version = "1.0.0",
        description = "FormForge - dynamic contact form with an admin editing surface",
        license(name = "Apache-2.0")
    ),
    paths(
        routes::health::health_check,
        routes::content::get_content,
        routes::content::update_content,
        routes::schema::get_schema,
        routes::schema::update_schema,
        routes::form::get_form,
        routes::session::get_session,
        routes::submissions::submit,
        routes::submissions::list_submissions,
    ),
    components(
        schemas(
            ErrorResponse, HealthResponse, SessionResponse, SubmitAccepted
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "content", description = "Landing page copy"),
        (name = "schema", description = "Form field schema"),
        (name = "form", description = "Public form rendering"),
        (name = "session", description = "Session observation"),
        (name = "submissions", description = "Form submissions")
    )
)]
pub struct ApiDoc;

/// Build the API router
pub fn build_router(state: ApiState) -> Router {
    let state = Arc::new(state);

    let public = Router::new()
        .route("/content", get(routes::content::get_content))
        .route("/schema", get(routes::schema::get_schema))
        .route("/form", get(routes::form::get_form))
        .route("/session", get(routes::session::get_session))
        .route("/submissions", post(routes::submissions::submit));

    let admin = Router::new()
        .route("/content", put(routes::content::update_content))
        .route("/schema", put(routes::schema::update_schema))
        .route("/submissions", get(routes::submissions::list_submissions))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::session::require_session,
        ));

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(routes::health::health_check))
        .nest("/api/v1", public)
        .nest("/api/v1/admin", admin)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
