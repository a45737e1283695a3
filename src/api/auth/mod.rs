//! Session resolution for the access guard.
//!
//! Flow Overview: pull the signed session token from the request headers,
//! verify its signature, look it up through a [`SessionProvider`], and hand
//! the guard an optional [`AuthResult`]. The guard copies it into [`Locals`] for downstream handlers.
//!
//! Security boundaries: this crate never issues sessions. Tokens are only
//! compared against rows the auth library wrote. Badly signed, unknown,
//! expired or banned sessions resolve to anonymous.

mod config;
mod error;
mod provider;
mod token;
mod types;

pub use config::{AuthConfig, AuthPlugin};
pub use error::AuthError;
pub use provider::{resolve_row, PgSessionProvider, SessionProvider, StaticSessionProvider};
pub use token::{clear_session_cookie, extract_session_token, sign_session_token};
pub use types::{AuthResult, Locals};
