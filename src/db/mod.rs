//! Postgres access: row types, session queries and schema bootstrap.

pub mod models;
pub mod schema;
pub mod sessions;

use anyhow::{Context, Result};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

/// Open the shared connection pool.
///
/// # Errors
/// Returns an error if the first connection cannot be established.
pub async fn connect(dsn: &str) -> Result<PgPool> {
    PgPoolOptions::new()
        .min_connections(1)
        .max_connections(5)
        .max_lifetime(Duration::from_secs(60 * 2))
        .test_before_acquire(true)
        .connect(dsn)
        .await
        .context("Failed to connect to database")
}
