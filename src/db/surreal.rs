//! SurrealDB-backed todo store and connection management.
//!
//! A single session serves the whole process. The handle starts out
//! unconnected; [`SurrealDatabase::connect`] establishes the session
//! against whichever engine the endpoint string names (`mem://`,
//! `surrealkv://<path>`, `ws://<host>:<port>`, ...) and then opens the
//! readiness gate. Operations invoked before the gate opens fail with
//! [`DbError::Unavailable`] instead of reaching the driver.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use surrealdb::engine::any::Any;
use surrealdb::{RecordId, Surreal};

use crate::db::models::Todo;
use crate::db::{DbError, DbResult};

/// Namespace and database selected after the connection handshake.
const NAMESPACE: &str = "todos";
const DATABASE: &str = "todos";

/// Table holding the todo collection.
const TABLE: &str = "todo";

/// Stored shape of a todo, as SurrealDB returns it.
///
/// The record id is database-assigned; the rest of the crate only ever
/// sees its key part as an opaque string.
#[derive(Debug, Deserialize)]
struct TodoRecord {
    id: RecordId,
    text: String,
    completed: bool,
}

impl From<TodoRecord> for Todo {
    fn from(record: TodoRecord) -> Self {
        Self {
            id: record.id.key().to_string(),
            text: record.text,
            completed: record.completed,
        }
    }
}

/// Content of a freshly created record; the id is left to the database.
#[derive(Debug, Serialize)]
struct NewTodoRecord {
    text: String,
    completed: bool,
}

/// Merge payload for completion updates. `text` is absent so an update
/// can never touch it.
#[derive(Debug, Serialize)]
struct CompletedPatch {
    completed: bool,
}

/// SurrealDB database handle with a readiness gate.
///
/// Cloning is cheap: the session and the gate are shared between clones.
#[derive(Clone)]
pub struct SurrealDatabase {
    db: Surreal<Any>,
    ready: Arc<AtomicBool>,
}

impl SurrealDatabase {
    /// Create an unconnected handle with the gate closed.
    pub fn new() -> Self {
        Self {
            db: Surreal::init(),
            ready: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a handle and connect it to the given endpoint.
    pub async fn open(endpoint: &str) -> DbResult<Self> {
        let database = Self::new();
        database.connect(endpoint).await?;
        Ok(database)
    }

    /// Create a connected in-memory database (useful for testing).
    pub async fn in_memory() -> DbResult<Self> {
        Self::open("mem://").await
    }

    /// Establish the session and open the readiness gate.
    ///
    /// There is no retry policy: a failed handshake leaves the gate closed
    /// for the lifetime of the handle.
    pub async fn connect(&self, endpoint: &str) -> DbResult<()> {
        self.db
            .connect(endpoint)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;
        self.db
            .use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;
        self.ready.store(true, Ordering::Release);
        Ok(())
    }

    /// Whether the connection handshake has completed.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    fn ensure_ready(&self) -> DbResult<()> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(DbError::Unavailable)
        }
    }

    /// Persist a new todo. The database assigns the id and `completed`
    /// starts out `false` regardless of the caller's input.
    pub async fn create_todo(&self, text: String) -> DbResult<Todo> {
        self.ensure_ready()?;
        let created: Option<TodoRecord> = self
            .db
            .create(TABLE)
            .content(NewTodoRecord {
                text,
                completed: false,
            })
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;
        let record = created.ok_or(DbError::Database {
            message: "create returned no record".to_string(),
        })?;
        Ok(record.into())
    }

    /// Fetch every record in the collection.
    pub async fn list_todos(&self) -> DbResult<Vec<Todo>> {
        self.ensure_ready()?;
        let records: Vec<TodoRecord> =
            self.db.select(TABLE).await.map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;
        Ok(records.into_iter().map(Todo::from).collect())
    }

    /// Overwrite the `completed` flag on one record in a single merge
    /// operation. An id with no record behind it surfaces as
    /// [`DbError::NotFound`].
    pub async fn set_completed(&self, id: &str, completed: bool) -> DbResult<Todo> {
        self.ensure_ready()?;
        let updated: Option<TodoRecord> = self
            .db
            .update((TABLE, id))
            .merge(CompletedPatch { completed })
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })?;
        let record = updated.ok_or(DbError::NotFound { id: id.to_string() })?;
        Ok(record.into())
    }

    /// Remove one record, returning it if it existed. Absence is not an
    /// error here; callers decide how to acknowledge it.
    pub async fn delete_todo(&self, id: &str) -> DbResult<Option<Todo>> {
        self.ensure_ready()?;
        let deleted: Option<TodoRecord> =
            self.db
                .delete((TABLE, id))
                .await
                .map_err(|e| DbError::Database {
                    message: e.to_string(),
                })?;
        Ok(deleted.map(Todo::from))
    }
}

impl Default for SurrealDatabase {
    fn default() -> Self {
        Self::new()
    }
}
