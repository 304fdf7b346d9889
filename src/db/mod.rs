//! Storage layer for the todo collection.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types
//! - `models`: The domain entity (Todo)
//! - `surreal`: SurrealDB-backed store and connection management

mod error;
mod models;
mod surreal;

#[cfg(test)]
mod surreal_test;

pub use error::{DbError, DbResult};
pub use models::*;
pub use surreal::SurrealDatabase;
