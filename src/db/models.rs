//! Domain model for the todo collection.
//!
//! The model is storage-agnostic; the record types that SurrealDB
//! serializes live with the store itself.

use serde::{Deserialize, Serialize};

/// Opaque record identifier, assigned by the database on creation.
pub type Id = String;

/// A single todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: Id,
    pub text: String,
    pub completed: bool,
}
