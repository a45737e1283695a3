use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::models::{Session, User};

/// What the session provider returns for a signed-in caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthResult {
    pub session: Session,
    pub user: User,
}

/// Request-scoped session state, stored as a request extension.
///
/// The guard inserts this on every request before deciding anything, so
/// handlers can always extract it. Both fields are `None` for anonymous callers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Locals {
    pub session: Option<Session>,
    pub user: Option<User>,
}

impl Locals {
    #[must_use]
    pub fn from_auth(auth: Option<&AuthResult>) -> Self {
        auth.map_or_else(Self::default, |result| Self {
            session: Some(result.session.clone()),
            user: Some(result.user.clone()),
        })
    }

    /// The session and user as a pair, if the caller is signed in.
    #[must_use]
    pub fn auth_result(&self) -> Option<AuthResult> {
        match (&self.session, &self.user) {
            (Some(session), Some(user)) => Some(AuthResult {
                session: session.clone(),
                user: user.clone(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_locals_are_empty() {
        let locals = Locals::from_auth(None);
        assert_eq!(locals, Locals::default());
        assert!(locals.auth_result().is_none());
    }

    #[test]
    fn locals_copy_the_auth_result() {
        let auth = AuthResult {
            session: Session::new("s1", "u1", "tok"),
            user: User::new("u1", "Ada", "ada@example.com"),
        };
        let locals = Locals::from_auth(Some(&auth));
        assert_eq!(locals.user.as_ref().map(|u| u.id.as_str()), Some("u1"));
        assert_eq!(locals.auth_result(), Some(auth));
    }
}
