//! Session resolution and the admin gate
//!
//! Credential handling lives with the external identity provider; this
//! layer only maps a presented bearer token to session presence and the
//! user's presentation data.

use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use formforge_core::gate::{self, AuthState, GateDecision};
use formforge_core::SessionUser;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{models::ApiResponse, ApiState};

/// Maps a bearer token to the session it represents, if any.
pub trait SessionProvider: Send + Sync {
    /// Resolve a token; `None` means no valid session.
    fn resolve(&self, token: &str) -> Option<SessionUser>;
}

/// Claims carried in the identity provider's tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    pub exp: usize,
}

/// Session provider over HS256-signed JWTs.
pub struct JwtSessionProvider {
    decoding: DecodingKey,
    encoding: EncodingKey,
}

impl JwtSessionProvider {
    /// Build a provider around the shared signing secret.
    pub fn new(secret: &str) -> Self {
        Self {
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            encoding: EncodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a session token, valid for eight hours.
    pub fn issue(&self, user: &SessionUser) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = SessionClaims {
            sub: user.email.clone().unwrap_or_else(|| "admin".into()),
            name: user.name.clone(),
            email: user.email.clone(),
            picture: user.photo_url.clone(),
            exp: (chrono::Utc::now().timestamp() + 8 * 3600) as usize,
        };
        encode(&Header::default(), &claims, &self.encoding)
    }
}

impl SessionProvider for JwtSessionProvider {
    fn resolve(&self, token: &str) -> Option<SessionUser> {
        let data =
            decode::<SessionClaims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
                .ok()?;
        Some(SessionUser {
            name: data.claims.name,
            email: data.claims.email,
            photo_url: data.claims.picture,
        })
    }
}

/// Auth state observed for one request.
pub fn observe(state: &ApiState, headers: &axum::http::HeaderMap) -> AuthState {
    match bearer_token(headers) {
        Some(token) => match state.sessions.resolve(token) {
            Some(user) => AuthState::Authenticated(user),
            None => AuthState::Unauthenticated,
        },
        None => AuthState::Unauthenticated,
    }
}

/// Admin gate: admit authenticated requests, otherwise answer 401 with a
/// login URL preserving the requested path.
pub async fn require_session(
    State(state): State<Arc<ApiState>>,
    mut request: Request,
    next: Next,
) -> Response {
    // Nested routers strip their prefix from `request.uri()`; the redirect
    // must carry the path the client actually requested.
    let requested_path = request
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.path().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let auth_state = observe(&state, request.headers());

    match gate::decide(&auth_state, &requested_path) {
        GateDecision::Admit => {
            if let AuthState::Authenticated(user) = auth_state {
                request.extensions_mut().insert(user);
            }
            next.run(request).await
        }
        GateDecision::RedirectToLogin { return_to } => {
            let login_url = gate::login_redirect(&state.config.auth.login_path, &return_to);
            tracing::warn!(path = %return_to, "unauthenticated admin request");
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::<()>::unauthenticated(login_url)),
            )
                .into_response()
        }
        // The HTTP boundary never observes a pending provider.
        GateDecision::Pending => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}

fn bearer_token(headers: &axum::http::HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
