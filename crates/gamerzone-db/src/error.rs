//! # Store Error Types
//!
//! Error types for document-store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CoreError (gamerzone-core) ← What repositories expose:                 │
//! │       │                       NotFound stays NotFound, the rest         │
//! │       │                       becomes Transient (retryable)             │
//! │       ▼                                                                 │
//! │  Caller surfaces an inline message or a retry banner                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use gamerzone_core::CoreError;
use thiserror::Error;

/// Document-store operation errors.
///
/// These wrap sqlx errors and provide additional context for debugging.
/// They never cross a repository boundary: repositories convert them to
/// [`CoreError`] on the way out.
#[derive(Debug, Error)]
pub enum DbError {
    /// Document absent from its collection.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Store connection failed (missing file, permissions, disk full).
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A stored document body is not valid JSON, or a domain value could
    /// not be serialized into one.
    #[error("Malformed document body: {0}")]
    MalformedDocument(String),

    /// Pool exhausted (all connections in use). Retryable.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal store error.
    #[error("Internal store error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → DbError::QueryFailed
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Document".to_string(),
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) => DbError::QueryFailed(db_err.message().to_string()),
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),
            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

impl From<serde_json::Error> for DbError {
    fn from(err: serde_json::Error) -> Self {
        DbError::MalformedDocument(err.to_string())
    }
}

/// The repository-boundary conversion: store failures become the domain
/// taxonomy. Only NotFound survives with its identity; everything else is a
/// transient, retryable failure from the caller's point of view.
impl From<DbError> for CoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => CoreError::NotFound { entity, id },
            other => CoreError::Transient(other.to_string()),
        }
    }
}

/// Result type for document-store operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_crosses_boundary_intact() {
        let err: CoreError = DbError::not_found("Product", "p1").into();
        assert!(matches!(err, CoreError::NotFound { .. }));
        assert_eq!(err.to_string(), "Product not found: p1");
    }

    #[test]
    fn test_other_db_errors_become_transient() {
        let err: CoreError = DbError::PoolExhausted.into();
        assert!(err.is_transient());

        let err: CoreError = DbError::QueryFailed("disk I/O error".to_string()).into();
        assert!(err.is_transient());
    }
}
