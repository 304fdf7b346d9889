//! Tests for the SurrealDB-backed todo store.

use crate::db::{DbError, SurrealDatabase};

async fn setup_db() -> SurrealDatabase {
    SurrealDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database")
}

#[tokio::test(flavor = "multi_thread")]
async fn todo_create_assigns_id_and_starts_incomplete() {
    let db = setup_db().await;

    let todo = db
        .create_todo("buy milk".to_string())
        .await
        .expect("Create should succeed");

    assert!(!todo.id.is_empty());
    assert_eq!(todo.text, "buy milk");
    assert!(!todo.completed);
}

#[tokio::test(flavor = "multi_thread")]
async fn todo_create_assigns_distinct_ids() {
    let db = setup_db().await;

    let first = db
        .create_todo("first".to_string())
        .await
        .expect("Create should succeed");
    let second = db
        .create_todo("second".to_string())
        .await
        .expect("Create should succeed");

    assert_ne!(first.id, second.id);
}

#[tokio::test(flavor = "multi_thread")]
async fn todo_list_starts_empty() {
    let db = setup_db().await;

    let todos = db.list_todos().await.expect("List should succeed");
    assert!(todos.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn todo_list_returns_every_record() {
    let db = setup_db().await;

    for text in ["one", "two", "three"] {
        db.create_todo(text.to_string())
            .await
            .expect("Create should succeed");
    }

    let todos = db.list_todos().await.expect("List should succeed");
    assert_eq!(todos.len(), 3);

    let mut texts: Vec<&str> = todos.iter().map(|t| t.text.as_str()).collect();
    texts.sort_unstable();
    assert_eq!(texts, vec!["one", "three", "two"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn todo_set_completed_updates_only_the_flag() {
    let db = setup_db().await;

    let created = db
        .create_todo("walk the dog".to_string())
        .await
        .expect("Create should succeed");

    let updated = db
        .set_completed(&created.id, true)
        .await
        .expect("Update should succeed");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.text, "walk the dog");
    assert!(updated.completed);
}

#[tokio::test(flavor = "multi_thread")]
async fn todo_set_completed_is_idempotent() {
    let db = setup_db().await;

    let created = db
        .create_todo("repeatable".to_string())
        .await
        .expect("Create should succeed");

    db.set_completed(&created.id, true)
        .await
        .expect("First update should succeed");
    let again = db
        .set_completed(&created.id, true)
        .await
        .expect("Second update should succeed");

    assert!(again.completed);
    assert_eq!(again.text, "repeatable");
}

#[tokio::test(flavor = "multi_thread")]
async fn todo_set_completed_can_clear_the_flag() {
    let db = setup_db().await;

    let created = db
        .create_todo("reopen me".to_string())
        .await
        .expect("Create should succeed");

    db.set_completed(&created.id, true)
        .await
        .expect("Update should succeed");
    let reopened = db
        .set_completed(&created.id, false)
        .await
        .expect("Update should succeed");

    assert!(!reopened.completed);
}

#[tokio::test(flavor = "multi_thread")]
async fn todo_set_completed_nonexistent_returns_not_found() {
    let db = setup_db().await;

    let result = db.set_completed("doesnotexist", true).await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn todo_delete_returns_record_then_none() {
    let db = setup_db().await;

    let created = db
        .create_todo("short lived".to_string())
        .await
        .expect("Create should succeed");

    let deleted = db
        .delete_todo(&created.id)
        .await
        .expect("Delete should succeed");
    assert_eq!(deleted.map(|t| t.id), Some(created.id.clone()));

    // A second delete of the same id is not an error, just a no-op
    let deleted_again = db
        .delete_todo(&created.id)
        .await
        .expect("Delete should succeed");
    assert!(deleted_again.is_none());

    let todos = db.list_todos().await.expect("List should succeed");
    assert!(todos.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn todo_text_round_trips_byte_for_byte() {
    let db = setup_db().await;

    let samples = ["", "   ", "résumé 🚀 äöü", "line\nbreak\tand \"quotes\""];
    for sample in samples {
        let created = db
            .create_todo(sample.to_string())
            .await
            .expect("Create should succeed");
        assert_eq!(created.text, sample);
    }

    let todos = db.list_todos().await.expect("List should succeed");
    assert_eq!(todos.len(), samples.len());
    for sample in samples {
        assert!(todos.iter().any(|t| t.text == sample));
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn operations_before_connect_return_unavailable() {
    let db = SurrealDatabase::new();
    assert!(!db.is_ready());

    let list = db.list_todos().await;
    assert!(matches!(list, Err(DbError::Unavailable)));

    let create = db.create_todo("too early".to_string()).await;
    assert!(matches!(create, Err(DbError::Unavailable)));

    let update = db.set_completed("anyid", true).await;
    assert!(matches!(update, Err(DbError::Unavailable)));

    let delete = db.delete_todo("anyid").await;
    assert!(matches!(delete, Err(DbError::Unavailable)));
}

#[tokio::test(flavor = "multi_thread")]
async fn connect_opens_the_readiness_gate() {
    let db = setup_db().await;
    assert!(db.is_ready());

    // Clones share the gate
    let clone = db.clone();
    assert!(clone.is_ready());
}

#[tokio::test(flavor = "multi_thread")]
async fn surrealkv_engine_stores_records_on_disk() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let endpoint = format!("surrealkv://{}", dir.path().join("todos.skv").display());

    let db = SurrealDatabase::open(&endpoint)
        .await
        .expect("Failed to open file-backed database");

    let created = db
        .create_todo("persisted".to_string())
        .await
        .expect("Create should succeed");

    let todos = db.list_todos().await.expect("List should succeed");
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].id, created.id);
    assert_eq!(todos[0].text, "persisted");
}
