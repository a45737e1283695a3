//! Session endpoints mirroring the auth library's `get-session` and `sign-out`.

use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::{
    api::auth::{clear_session_cookie, extract_session_token, AuthConfig, AuthResult, Locals},
    db::sessions::delete_session,
};

#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct SignOutResponse {
    pub success: bool,
}

#[utoipa::path(
    get,
    path = "/api/auth/get-session",
    responses(
        (status = 200, description = "Current session and user, or null when anonymous", body = AuthResult)
    ),
    tag = "auth"
)]
pub async fn get_session(Extension(locals): Extension<Locals>) -> Json<Option<AuthResult>> {
    Json(locals.auth_result())
}

#[utoipa::path(
    post,
    path = "/api/auth/sign-out",
    responses(
        (status = 200, description = "Session revoked and cookie cleared", body = SignOutResponse),
        (status = 500, description = "Session could not be revoked", body = SignOutResponse)
    ),
    tag = "auth"
)]
pub async fn sign_out(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    config: Extension<Arc<AuthConfig>>,
) -> impl IntoResponse {
    if let Some(token) = extract_session_token(&headers, &config) {
        match delete_session(&pool, &token).await {
            Ok(true) => debug!("Session revoked"),
            Ok(false) => debug!("Sign-out for unknown session"),
            Err(err) => {
                // The row is still valid, so keep the cookie and report failure.
                error!("Failed to delete session: {err}");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    HeaderMap::new(),
                    Json(SignOutResponse { success: false }),
                );
            }
        }
    }

    // Clear the cookie even if the session record was missing.
    let mut response_headers = HeaderMap::new();
    match clear_session_cookie(&config) {
        Ok(cookie) => {
            response_headers.insert(SET_COOKIE, cookie);
        }
        Err(err) => error!("Failed to build session cookie: {err}"),
    }

    (
        StatusCode::OK,
        response_headers,
        Json(SignOutResponse { success: true }),
    )
}
