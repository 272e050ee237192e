//! Shared setup for the API integration tests.
//!
//! The suites drive the real router over the in-memory backend, so they
//! exercise the same code paths as production minus the network and
//! PostgreSQL.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use nocturne_api::{app, AppState};
use nocturne_core::{Author, CreateNoteRequest, Note, NoteStore, User};
use nocturne_db::{MemoryNoteStore, MemoryUserStore};

pub struct TestApp {
    pub router: Router,
    pub notes: Arc<MemoryNoteStore>,
    pub users: Arc<MemoryUserStore>,
}

pub async fn test_app() -> TestApp {
    let notes = Arc::new(MemoryNoteStore::new());
    let users = Arc::new(MemoryUserStore::new());
    let state = AppState::new(notes.clone(), users.clone());
    TestApp {
        router: app(state),
        notes,
        users,
    }
}

/// Register a user and return it.
pub async fn seed_user(app: &TestApp, name: &str) -> User {
    let user = User {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        is_active: true,
        created_at: Utc::now(),
    };
    app.users.add(user.clone()).await;
    user
}

/// Insert a note directly into the store, `age_minutes` in the past so
/// orderings are unambiguous.
pub async fn seed_note(
    app: &TestApp,
    owner: &User,
    title: &str,
    content: &str,
    tags: &[&str],
    public: bool,
    age_minutes: i64,
) -> Note {
    let mut note = Note::create(
        Author {
            id: owner.id,
            name: owner.name.clone(),
            email: owner.email.clone(),
        },
        CreateNoteRequest {
            title: title.to_string(),
            content: content.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            is_public: public,
        },
    );
    note.created_at = Utc::now() - chrono::Duration::minutes(age_minutes);
    note.updated_at = note.created_at;
    app.notes.save(&note).await.unwrap()
}

/// Issue a request against the router and decode the JSON body.
pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    caller: Option<Uuid>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(id) = caller {
        builder = builder.header("x-user-id", id.to_string());
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, value)
}

/// Shorthand for GET requests.
pub async fn get(router: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(router, "GET", uri, None, None).await
}
