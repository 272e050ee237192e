//! User profile endpoints.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;

use nocturne_core::{FilterSpec, NotePayload};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::params::UserNotesParams;
use crate::state::AppState;

/// `GET /api/users/:id` — public profile with the public-note count.
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .users
        .find_by_id(id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let public_notes_count = state
        .engine
        .count(&FilterSpec::owned_by(user.id).with_visibility(true))
        .await?;

    Ok(Json(serde_json::json!({
        "user": {
            "id": user.id,
            "name": user.name,
            "email": user.email,
            "createdAt": user.created_at,
            "publicNotesCount": public_notes_count,
        }
    })))
}

/// `GET /api/users/:id/notes` — the user's public notes, paginated.
pub async fn get_user_notes(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserNotesParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = params.into_query(id)?;

    let user = state
        .users
        .find_by_id(id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let page = state.engine.list(query).await?;
    let notes: Vec<NotePayload> = page.notes.into_iter().map(NotePayload::from).collect();

    Ok(Json(serde_json::json!({
        "user": {
            "id": user.id,
            "name": user.name,
            "email": user.email,
        },
        "notes": notes,
        "pagination": page.pagination,
    })))
}

/// `GET /api/users/:id/stats` — dashboard statistics, self-only.
pub async fn get_user_stats(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    if id != caller_id {
        return Err(ApiError::Forbidden(
            "Not authorized to view these statistics".to_string(),
        ));
    }

    let stats = state.engine.user_stats(caller_id).await?;
    Ok(Json(serde_json::json!({ "stats": stats })))
}
