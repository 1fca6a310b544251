//! Error types for movies

use crate::validate::ValidationErrors;
use thiserror::Error;

/// Result type alias for database-level operations
pub type DbResult<T> = Result<T, DbError>;

/// Result type alias for store and service operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures raised by the database driver or the connection pool.
#[derive(Debug, Error)]
pub enum DbError {
    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution error
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// A query expected a row and got none
    #[error("Not found: {0}")]
    NotFound(String),

    /// Check constraint violation
    #[error("Check constraint violation: {0}")]
    CheckViolation(String),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Pool error
    #[cfg(feature = "pool")]
    #[error("Pool error: {0}")]
    Pool(String),
}

impl DbError {
    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a missing-row error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Check if this is a missing-row error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this is a check constraint violation
    pub fn is_check_violation(&self) -> bool {
        matches!(self, Self::CheckViolation(_))
    }

    /// Parse a tokio_postgres error into a more specific DbError
    pub fn from_db_error(err: tokio_postgres::Error) -> Self {
        if let Some(db_err) = err.as_db_error() {
            let constraint = db_err.constraint().unwrap_or("unknown");
            let message = db_err.message();

            // 23514: the rating range CHECK is the table's only constraint
            // beyond NOT NULL
            if db_err.code().code() == "23514" {
                return Self::CheckViolation(format!("{}: {}", constraint, message));
            }
        }
        Self::Query(err)
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for DbError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}

/// The closed set of failures a store or service call can report.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Caller-supplied identifier or body failed validation
    #[error("Invalid input: {0}")]
    InvalidInput(ValidationErrors),

    /// The target does not exist or is already soft-deleted
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// An update named no mutable fields
    #[error("No fields to update")]
    NoFieldsToUpdate,

    /// Any underlying database failure
    #[error("Storage error: {0}")]
    Storage(#[from] DbError),
}

impl StoreError {
    /// Create a not found error for an entity id
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Check if this is an invalid input error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a no-op update
    pub fn is_no_fields_to_update(&self) -> bool {
        matches!(self, Self::NoFieldsToUpdate)
    }

    /// Check if this is a storage error
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

impl From<ValidationErrors> for StoreError {
    fn from(errs: ValidationErrors) -> Self {
        Self::InvalidInput(errs)
    }
}
