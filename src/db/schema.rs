//! Idempotent schema bootstrap for the auth tables.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::{debug, info};

pub const SCHEMA_SQL: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/db/sql/schema.sql"));

/// Apply `db/sql/schema.sql` statement by statement.
///
/// # Errors
/// Returns an error naming the first statement that fails.
pub async fn apply(pool: &PgPool) -> Result<()> {
    let statements = split_sql_statements(SCHEMA_SQL);
    for (index, statement) in statements.iter().enumerate() {
        debug!("Applying schema statement {}", index + 1);
        sqlx::query(statement)
            .execute(pool)
            .await
            .with_context(|| format!("failed to execute schema statement {}", index + 1))?;
    }

    info!("Schema applied ({} statements)", statements.len());

    Ok(())
}

/// Split a SQL script on statement-terminating semicolons, dropping `--` comment lines.
fn split_sql_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();

    for line in sql.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("--") {
            continue;
        }
        current.push_str(line);
        current.push('\n');

        if trimmed.ends_with(';') {
            let statement = current.trim();
            if !statement.is_empty() {
                statements.push(statement.to_string());
            }
            current.clear();
        }
    }

    let leftover = current.trim();
    if !leftover.is_empty() {
        statements.push(leftover.to_string());
    }

    statements
}
