//! Request-time access guard.
//!
//! Flow Overview:
//! 1. Resolve the caller through the [`SessionProvider`] (one round trip).
//! 2. Store [`Locals`] on the request, `None`/`None` when anonymous.
//! 3. Walk the auth, onboarding and admin rules in order; the first redirect
//!    ends the request with `302 Found`.
//! 4. Otherwise hand the request to the inner router and return its response.
//!
//! Prefix checks are plain string prefixes, so `/application` counts as `/app`.
//! Anonymous callers are treated as onboarded and non-admin by the later rules.

use axum::{
    extract::{Request, State},
    http::{header::LOCATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, error};

use super::auth::{Locals, SessionProvider};
use crate::db::models::User;

pub const APP_PATH: &str = "/app";
pub const LOGIN_PATH: &str = "/login";
pub const SIGNUP_PATH: &str = "/signup";
pub const GET_STARTED_PATH: &str = "/get-started";
pub const ADMIN_PATH: &str = "/admin";

/// Which rule group produced a redirect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardRule {
    Auth,
    Onboarding,
    Admin,
}

impl GuardRule {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Onboarding => "onboarding",
            Self::Admin => "admin",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub status: StatusCode,
    pub location: &'static str,
    pub rule: GuardRule,
}

impl Redirect {
    const fn found(location: &'static str, rule: GuardRule) -> Self {
        Self {
            status: StatusCode::FOUND,
            location,
            rule,
        }
    }
}

impl IntoResponse for Redirect {
    fn into_response(self) -> Response {
        (self.status, [(LOCATION, self.location)]).into_response()
    }
}

/// Outcome of the rule chain for one request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Redirect(Redirect),
    Forward,
}

/// Evaluate the rule chain for `path` and the (optional) signed-in user.
#[must_use]
pub fn evaluate(path: &str, user: Option<&User>) -> GuardDecision {
    // Auth
    let is_logged_in = user.is_some();

    if !is_logged_in && path.starts_with(APP_PATH) {
        return GuardDecision::Redirect(Redirect::found(LOGIN_PATH, GuardRule::Auth));
    }

    if is_logged_in && (path.starts_with(LOGIN_PATH) || path.starts_with(SIGNUP_PATH)) {
        return GuardDecision::Redirect(Redirect::found(APP_PATH, GuardRule::Auth));
    }

    // Onboarding
    let is_onboarded = user.map_or(true, |user| user.is_onboarded);

    if !is_onboarded && path.starts_with(APP_PATH) {
        return GuardDecision::Redirect(Redirect::found(GET_STARTED_PATH, GuardRule::Onboarding));
    }

    if is_onboarded && path.starts_with(GET_STARTED_PATH) {
        return GuardDecision::Redirect(Redirect::found(APP_PATH, GuardRule::Onboarding));
    }

    // Admin
    let is_admin = user.is_some_and(User::is_admin);

    if !is_admin && path.starts_with(ADMIN_PATH) {
        return GuardDecision::Redirect(Redirect::found(APP_PATH, GuardRule::Admin));
    }

    GuardDecision::Forward
}

/// Axum middleware running the guard in front of every route.
pub async fn access_guard(
    State(provider): State<Arc<dyn SessionProvider>>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth = match provider.get_session(request.headers()).await {
        Ok(auth) => auth,
        Err(err) => {
            error!("Failed to resolve session: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let locals = Locals::from_auth(auth.as_ref());
    request.extensions_mut().insert(locals);

    let path = request.uri().path();
    match evaluate(path, auth.as_ref().map(|result| &result.user)) {
        GuardDecision::Redirect(redirect) => {
            debug!(
                rule = redirect.rule.as_str(),
                path,
                location = redirect.location,
                "Guard redirect"
            );
            redirect.into_response()
        }
        GuardDecision::Forward => next.run(request).await,
    }
}
