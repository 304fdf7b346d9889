//! Application state for the API server.

use crate::db::SurrealDatabase;

/// Shared application state.
///
/// Holds the process-wide database handle. `SurrealDatabase` clones share
/// the underlying session and readiness gate, so the state derives `Clone`
/// and axum can hand a copy to every request.
#[derive(Clone)]
pub struct AppState {
    db: SurrealDatabase,
}

impl AppState {
    /// Create a new AppState with the given database handle.
    ///
    /// The handle may still be unconnected; handlers answer 503 until the
    /// background connection opens the readiness gate.
    pub fn new(db: SurrealDatabase) -> Self {
        Self { db }
    }

    /// Get a reference to the database.
    pub fn db(&self) -> &SurrealDatabase {
        &self.db
    }
}
