//! Custom error types for the store layer
//!
//! The store reports every failure through [`DatabaseError`]. Callers match
//! on the variant instead of inspecting an untyped error value, so a
//! malformed identifier is distinguishable from a missing row or a failed
//! query.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// An identifier does not match the store's identifier scheme
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A unique constraint was violated
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
