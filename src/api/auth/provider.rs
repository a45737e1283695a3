//! Session providers: the `getSession(headers)` seam the guard calls into.

use async_trait::async_trait;
use axum::http::HeaderMap;
use sqlx::PgPool;
use std::{collections::HashMap, sync::Arc};
use tracing::debug;

use super::{token::extract_session_token, AuthConfig, AuthError, AuthResult};
use crate::db::sessions::{lookup_session, SessionRow};

/// Resolves request headers into the caller's session.
///
/// `Ok(None)` means anonymous. An `Err` fails the request.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn get_session(&self, headers: &HeaderMap) -> Result<Option<AuthResult>, AuthError>;
}

/// Reads sessions the auth library wrote to Postgres.
#[derive(Clone, Debug)]
pub struct PgSessionProvider {
    pool: PgPool,
    config: Arc<AuthConfig>,
}

impl PgSessionProvider {
    #[must_use]
    pub const fn new(pool: PgPool, config: Arc<AuthConfig>) -> Self {
        Self { pool, config }
    }
}

#[async_trait]
impl SessionProvider for PgSessionProvider {
    async fn get_session(&self, headers: &HeaderMap) -> Result<Option<AuthResult>, AuthError> {
        // No verified token, no round trip.
        let Some(token) = extract_session_token(headers, &self.config) else {
            return Ok(None);
        };

        let Some(row) = lookup_session(&self.pool, &token).await? else {
            debug!("Session token not found or expired");
            return Ok(None);
        };

        Ok(resolve_row(row, &self.config))
    }
}

/// Apply the admin plugin rules to a looked-up session.
///
/// With the plugin enabled, an active ban hides the session. Without it,
/// roles are not exposed and bans are ignored.
#[must_use]
pub fn resolve_row(row: SessionRow, config: &AuthConfig) -> Option<AuthResult> {
    let mut user = row.user;
    if config.admin_enabled() {
        if row.ban_active {
            debug!("Session belongs to a banned user");
            return None;
        }
    } else {
        user.role = None;
    }

    Some(AuthResult {
        session: row.session,
        user,
    })
}

/// In-memory provider keyed by session token.
#[derive(Clone, Debug)]
pub struct StaticSessionProvider {
    config: AuthConfig,
    sessions: HashMap<String, AuthResult>,
}

impl StaticSessionProvider {
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            config: config.clone(),
            sessions: HashMap::new(),
        }
    }

    /// Register `auth` under its own session token.
    #[must_use]
    pub fn with_session(mut self, auth: AuthResult) -> Self {
        self.sessions.insert(auth.session.token.clone(), auth);
        self
    }
}

#[async_trait]
impl SessionProvider for StaticSessionProvider {
    async fn get_session(&self, headers: &HeaderMap) -> Result<Option<AuthResult>, AuthError> {
        Ok(extract_session_token(headers, &self.config)
            .and_then(|token| self.sessions.get(&token).cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::auth::{token::sign_session_token, AuthPlugin},
        db::models::{Session, User},
    };
    use axum::http::HeaderValue;
    use secrecy::SecretString;
    use sqlx::postgres::PgPoolOptions;

    const SECRET: &str = "better-auth-secret-0123456789";

    fn config() -> AuthConfig {
        AuthConfig::new("vibe-check", SecretString::from(SECRET))
    }

    fn auth(token: &str) -> AuthResult {
        AuthResult {
            session: Session::new("s1", "u1", token),
            user: User::new("u1", "Ada", "ada@example.com"),
        }
    }

    fn row(banned: bool) -> SessionRow {
        let mut user = User::new("u1", "Ada", "ada@example.com")
            .onboarded(true)
            .with_role("admin");
        user.banned = banned;
        SessionRow {
            session: Session::new("s1", "u1", "tok-1"),
            user,
            ban_active: banned,
        }
    }

    fn cookie_headers(name: &str, token: &str) -> HeaderMap {
        let value = format!("{name}={}", sign_session_token(token, &SecretString::from(SECRET)));
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&value) {
            headers.insert("cookie", value);
        }
        headers
    }

    #[test]
    fn admin_plugin_keeps_role_of_unbanned_user() {
        let resolved = resolve_row(row(false), &config());
        let Some(resolved) = resolved else {
            panic!("unbanned user should resolve");
        };
        assert_eq!(resolved.user.role.as_deref(), Some("admin"));
        assert_eq!(resolved.session.id, "s1");
    }

    #[test]
    fn admin_plugin_hides_banned_user() {
        assert_eq!(resolve_row(row(true), &config()), None);
    }

    #[test]
    fn without_admin_plugin_role_is_cleared() {
        let config = config().with_plugins(Vec::new());
        let resolved = resolve_row(row(false), &config);
        assert_eq!(resolved.map(|auth| auth.user.role), Some(None));
    }

    #[test]
    fn without_admin_plugin_bans_are_ignored() {
        let config = config().with_plugins(vec![AuthPlugin::Bearer]);
        let Some(resolved) = resolve_row(row(true), &config) else {
            panic!("bans only apply with the admin plugin");
        };
        assert_eq!(resolved.user.role, None);
        assert!(!resolved.user.is_admin());
    }

    #[tokio::test]
    async fn static_provider_resolves_known_token() -> Result<(), AuthError> {
        let provider = StaticSessionProvider::new(&config()).with_session(auth("tok-1"));

        let found = provider
            .get_session(&cookie_headers("better-auth.session_token", "tok-1"))
            .await?;
        assert_eq!(found, Some(auth("tok-1")));

        let missing = provider
            .get_session(&cookie_headers("better-auth.session_token", "tok-2"))
            .await?;
        assert_eq!(missing, None);
        Ok(())
    }

    #[tokio::test]
    async fn static_provider_honours_cookie_prefix() -> Result<(), AuthError> {
        let config = config().with_cookie_prefix("vibe");
        let provider = StaticSessionProvider::new(&config).with_session(auth("tok-1"));

        let wrong_name = provider
            .get_session(&cookie_headers("better-auth.session_token", "tok-1"))
            .await?;
        assert_eq!(wrong_name, None);

        let right_name = provider
            .get_session(&cookie_headers("vibe.session_token", "tok-1"))
            .await?;
        assert!(right_name.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn pg_provider_skips_database_without_verified_token() -> anyhow::Result<()> {
        // Lazy pool: any query would fail to connect, so Ok(None) proves no round trip.
        let pool = PgPoolOptions::new().connect_lazy("postgres://postgres@localhost:1/none")?;
        let provider = PgSessionProvider::new(pool, Arc::new(config()));

        assert!(provider.get_session(&HeaderMap::new()).await?.is_none());

        let mut unsigned = HeaderMap::new();
        unsigned.insert(
            "cookie",
            HeaderValue::from_static("better-auth.session_token=tok-1"),
        );
        assert!(provider.get_session(&unsigned).await?.is_none());
        Ok(())
    }
}
