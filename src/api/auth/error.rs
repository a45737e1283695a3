use thiserror::Error;

/// Failure to resolve a session. Fatal for the request; never retried.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("session lookup failed: {0}")]
    Database(#[source] sqlx::Error),
    #[error("auth provider unavailable: {0}")]
    Unavailable(String),
}

// Pool exhaustion or shutdown means no connection was ever reached.
impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                Self::Unavailable(err.to_string())
            }
            other => Self::Database(other),
        }
    }
}
