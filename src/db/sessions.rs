//! Session queries against the auth library's tables.

use sqlx::{PgPool, Row};
use tracing::Instrument;

use super::models::{Session, User};

/// A session joined with its user, plus the ban state computed in SQL.
#[derive(Clone, Debug)]
pub struct SessionRow {
    pub session: Session,
    pub user: User,
    /// `banned` is set and `ban_expires` is unset or in the future.
    pub ban_active: bool,
}

/// Look up an unexpired session by its token.
///
/// # Errors
/// Returns the underlying `sqlx` error if the query fails.
pub async fn lookup_session(pool: &PgPool, token: &str) -> Result<Option<SessionRow>, sqlx::Error> {
    let query = r#"
        SELECT
            s.id,
            s.user_id,
            s.token,
            EXTRACT(EPOCH FROM s.expires_at)::BIGINT AS expires_at_unix,
            s.ip_address,
            s.user_agent,
            s.impersonated_by,
            u.name,
            u.email,
            u.email_verified,
            u.image,
            COALESCE(u.is_onboarded, FALSE) AS is_onboarded,
            u.role,
            COALESCE(u.banned, FALSE) AS banned,
            (COALESCE(u.banned, FALSE)
                AND (u.ban_expires IS NULL OR u.ban_expires > NOW())) AS ban_active
        FROM session s
        JOIN "user" u ON u.id = s.user_id
        WHERE s.token = $1 AND s.expires_at > NOW()
    "#;
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(token)
        .fetch_optional(pool)
        .instrument(span)
        .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let user_id: String = row.try_get("user_id")?;
    Ok(Some(SessionRow {
        session: Session {
            id: row.try_get("id")?,
            user_id: user_id.clone(),
            token: row.try_get("token")?,
            expires_at_unix: row.try_get("expires_at_unix")?,
            ip_address: row.try_get("ip_address")?,
            user_agent: row.try_get("user_agent")?,
            impersonated_by: row.try_get("impersonated_by")?,
        },
        user: User {
            id: user_id,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            email_verified: row.try_get("email_verified")?,
            image: row.try_get("image")?,
            is_onboarded: row.try_get("is_onboarded")?,
            role: row.try_get("role")?,
            banned: row.try_get("banned")?,
        },
        ban_active: row.try_get("ban_active")?,
    }))
}

/// Delete the session holding `token`. Returns whether a row was removed.
///
/// # Errors
/// Returns the underlying `sqlx` error if the query fails.
pub async fn delete_session(pool: &PgPool, token: &str) -> Result<bool, sqlx::Error> {
    let query = "DELETE FROM session WHERE token = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "DELETE",
        db.statement = query
    );
    let result = sqlx::query(query)
        .bind(token)
        .execute(pool)
        .instrument(span)
        .await?;

    Ok(result.rows_affected() > 0)
}
