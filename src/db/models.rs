//! Row types for the auth tables the session lookup reads.
//!
//! Field names serialize in camelCase to match the auth library's JSON shape.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A row of the `user` table, as exposed to handlers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub email_verified: bool,
    pub image: Option<String>,
    /// Set once the post-signup flow is complete.
    pub is_onboarded: bool,
    /// Role string written by the admin plugin, e.g. `admin` or `user,admin`.
    pub role: Option<String>,
    pub banned: bool,
}

impl User {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            email_verified: false,
            image: None,
            is_onboarded: false,
            role: None,
            banned: false,
        }
    }

    #[must_use]
    pub const fn onboarded(mut self, is_onboarded: bool) -> Self {
        self.is_onboarded = is_onboarded;
        self
    }

    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// True when the role string contains `admin` anywhere.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.as_deref().is_some_and(|role| role.contains("admin"))
    }
}

/// A row of the `session` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub user_id: String,
    #[serde(skip_serializing, default)]
    pub token: String,
    pub expires_at_unix: i64,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub impersonated_by: Option<String>,
}

impl Session {
    #[must_use]
    pub fn new(id: impl Into<String>, user_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            token: token.into(),
            expires_at_unix: 0,
            ip_address: None,
            user_agent: None,
            impersonated_by: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_admin_matches_substring() {
        let user = User::new("u1", "Ada", "ada@example.com");
        assert!(!user.is_admin());
        assert!(user.clone().with_role("admin").is_admin());
        assert!(user.clone().with_role("user,admin").is_admin());
        assert!(user.clone().with_role("superadmin").is_admin());
        assert!(!user.with_role("user").is_admin());
    }

    #[test]
    fn user_serializes_camel_case() {
        let user = User::new("u1", "Ada", "ada@example.com").onboarded(true);
        let json = serde_json::to_value(&user).unwrap_or_default();
        assert_eq!(json["isOnboarded"], serde_json::json!(true));
        assert_eq!(json["emailVerified"], serde_json::json!(false));
        assert!(json["role"].is_null());
    }

    #[test]
    fn session_token_is_not_serialized() {
        let session = Session::new("s1", "u1", "secret-token");
        let json = serde_json::to_value(&session).unwrap_or_default();
        assert!(json.get("token").is_none());
        assert_eq!(json["userId"], serde_json::json!("u1"));
    }
}
