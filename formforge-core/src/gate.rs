//! Session gate over an injected auth-state stream
//!
//! The gate is a subscription, not a one-shot check: it re-evaluates
//! whenever the external identity provider pushes a new state, including an
//! external sign-out mid-session.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Presentation data observed from the external identity provider.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Avatar URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// Externally-owned auth state as observed by this system.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthState {
    /// Provider has not settled yet
    #[default]
    Unknown,
    /// A session exists
    Authenticated(SessionUser),
    /// No session
    Unauthenticated,
}

/// What a gated view should do for the current auth state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateDecision {
    /// Render a loading placeholder and take no action
    Pending,
    /// Admit into the gated view
    Admit,
    /// Redirect to the login view, preserving the requested path
    RedirectToLogin {
        /// Path to return to after sign-in
        return_to: String,
    },
}

/// Pure gate predicate.
pub fn decide(state: &AuthState, requested_path: &str) -> GateDecision {
    match state {
        AuthState::Unknown => GateDecision::Pending,
        AuthState::Authenticated(_) => GateDecision::Admit,
        AuthState::Unauthenticated => GateDecision::RedirectToLogin {
            return_to: requested_path.to_string(),
        },
    }
}

/// Login URL carrying the originally requested path for post-login return.
///
/// The path is percent-encoded so query strings and fragments in the
/// requested path cannot corrupt the redirect parameter.
pub fn login_redirect(login_path: &str, return_to: &str) -> String {
    format!("{login_path}?redirect={}", urlencoding::encode(return_to))
}

/// Reactive gate over an injected session-state subscription.
#[derive(Debug)]
pub struct SessionGate {
    states: watch::Receiver<AuthState>,
    requested_path: String,
}

impl SessionGate {
    /// Gate a view at `requested_path` on the given state stream.
    pub fn new(states: watch::Receiver<AuthState>, requested_path: impl Into<String>) -> Self {
        Self {
            states,
            requested_path: requested_path.into(),
        }
    }

    /// Decision for the state observed right now.
    pub fn decision(&self) -> GateDecision {
        decide(&self.states.borrow(), &self.requested_path)
    }

    /// Wait for the next state change and re-evaluate.
    ///
    /// When the provider side is gone the current decision is returned
    /// as-is.
    pub async fn changed(&mut self) -> GateDecision {
        let _ = self.states.changed().await;
        self.decision()
    }

    /// Wait until the provider settles out of `Unknown` and return the
    /// resulting admit/redirect decision.
    pub async fn settled(&mut self) -> GateDecision {
        loop {
            match self.decision() {
                GateDecision::Pending => {
                    if self.states.changed().await.is_err() {
                        return self.decision();
                    }
                }
                decision => return decision,
            }
        }
    }
}
