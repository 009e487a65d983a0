//! Error types for the database layer.

use thiserror::Error;

/// Database operation result type.
pub type Result<T> = std::result::Result<T, DbError>;

/// Database errors.
///
/// A lookup that matches nothing is not an error; the query methods return
/// `Ok(None)` or an empty vec for that.
#[derive(Error, Debug)]
pub enum DbError {
    /// The store could not be reached (refused, timed out, bad credentials)
    #[error("Failed to connect to database: {0}")]
    Connection(#[source] sqlx::Error),

    /// Connecting did not finish within the configured timeout
    #[error("Timed out connecting to database after {0}s")]
    ConnectTimeout(u64),

    /// The connection was up but the statement failed
    #[error("Query failed: {0}")]
    Query(#[source] sqlx::Error),

    /// Rejected configuration (unknown URL scheme, bad table name, ...)
    #[error("Invalid database configuration: {0}")]
    InvalidConfig(String),
}

impl DbError {
    /// Create an invalid configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// True for faults reaching the store, as opposed to statement failures.
    pub fn is_connection(&self) -> bool {
        matches!(self, DbError::Connection(_) | DbError::ConnectTimeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_kinds() {
        assert!(DbError::ConnectTimeout(5).is_connection());
        assert!(DbError::Connection(sqlx::Error::PoolTimedOut).is_connection());
        assert!(!DbError::Query(sqlx::Error::RowNotFound).is_connection());
        assert!(!DbError::invalid_config("x").is_connection());
    }

    #[test]
    fn test_timeout_message() {
        let msg = DbError::ConnectTimeout(5).to_string();
        assert!(msg.contains("5s"));
    }
}
