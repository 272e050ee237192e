//! # nocturne-api
//!
//! HTTP API for the nocturne note service. The router is assembled here
//! so integration tests can drive it over the in-memory backend; the
//! binary in `main.rs` wires it to PostgreSQL and the network.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod params;
pub mod state;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

pub use error::ApiError;
pub use state::AppState;

use handlers::notes::{
    all_tags, create_note, delete_note, get_note, like_note, list_notes, update_note,
};
use handlers::system::health_check;
use handlers::users::{get_user, get_user_notes, get_user_stats};

/// Global rate limit check; passthrough when no limiter is configured.
async fn rate_limit(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if let Some(limiter) = &state.rate_limiter {
        if limiter.check().is_err() {
            return (
                StatusCode::TOO_MANY_REQUESTS,
                Json(serde_json::json!({
                    "error": "Too many requests, please try again later"
                })),
            )
                .into_response();
        }
    }
    next.run(req).await
}

/// Build the service router over the given state.
pub fn app(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Notes
        .route("/api/notes", get(list_notes).post(create_note))
        .route("/api/notes/tags/all", get(all_tags))
        .route(
            "/api/notes/:id",
            get(get_note).put(update_note).delete(delete_note),
        )
        .route("/api/notes/:id/like", post(like_note))
        // Users
        .route("/api/users/:id", get(get_user))
        .route("/api/users/:id/notes", get(get_user_notes))
        .route("/api/users/:id/stats", get(get_user_stats))
        .layer(middleware::from_fn_with_state(state.clone(), rate_limit))
        .with_state(state)
}
