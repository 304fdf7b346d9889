//! Database error types.
//!
//! This module provides abstracted error types for database operations.
//! It uses miette for fancy diagnostic output and thiserror for derive macros.
//! The error types are storage-backend agnostic.

use miette::Diagnostic;
use thiserror::Error;

/// Database operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Todo not found: id '{id}'")]
    #[diagnostic(code(todos::db::not_found))]
    NotFound { id: String },

    #[error("Database not ready: the connection has not been established")]
    #[diagnostic(code(todos::db::unavailable))]
    Unavailable,

    #[error("Connection error: {message}")]
    #[diagnostic(code(todos::db::connection_error))]
    Connection { message: String },

    #[error("Database error: {message}")]
    #[diagnostic(code(todos::db::database_error))]
    Database { message: String },
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
