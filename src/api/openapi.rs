use crate::api::auth::AuthResult;
use crate::api::handlers::{health, session};
use crate::db::models::{Session, User};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(health::health, session::get_session, session::sign_out),
    components(schemas(health::Health, session::SignOutResponse, AuthResult, Session, User)),
    tags(
        (name = "health", description = "Service and database health"),
        (name = "auth", description = "Session endpoints")
    )
)]
pub struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    // Use Cargo.toml metadata instead of the derive defaults.
    doc.info.title = env!("CARGO_PKG_NAME").to_string();
    doc.info.version = env!("CARGO_PKG_VERSION").to_string();
    doc.info.description = Some(env!("CARGO_PKG_DESCRIPTION").to_string());
    doc
}
