//! # Vibe Check (access guard)
//!
//! `vibe-check` fronts the application's pages. Every request is resolved
//! against the session store and then walked through a fixed chain of guard
//! rules before it reaches a page handler.
//!
//! ## Guard chain
//!
//! Rules are evaluated in order and the first redirect wins:
//!
//! - **Auth:** anonymous callers are sent from `/app` to `/login`; signed-in
//!   users are sent from `/login` and `/signup` to `/app`.
//! - **Onboarding:** users that have not finished onboarding are sent from
//!   `/app` to `/get-started`; onboarded users are sent from `/get-started`
//!   back to `/app`.
//! - **Admin:** callers whose role does not contain `admin` are sent from
//!   `/admin` to `/app`.
//!
//! Anonymous callers count as onboarded and non-admin for the last two groups.
//! All redirects use `302 Found`.
//!
//! ## Sessions
//!
//! Sessions are written by the auth library into Postgres. This service only
//! reads them. The session token comes from the signed `<prefix>.session_token`
//! cookie, or from a bearer header when the bearer plugin is enabled. The
//! resolved session and user are exposed to handlers as request
//! [`Locals`](api::auth::Locals).

pub mod api;
pub mod cli;
pub mod db;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
