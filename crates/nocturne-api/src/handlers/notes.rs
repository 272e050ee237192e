//! Note endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use nocturne_core::{
    Author, CreateNoteRequest, NotePayload, Pagination, UpdateNoteRequest,
};

use crate::auth::{AuthUser, OptionalAuthUser};
use crate::error::ApiError;
use crate::params::{resolve_listing_visibility, ListNotesParams};
use crate::state::AppState;

/// Listing response: the page plus its metadata.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ListNotesResponse {
    pub notes: Vec<NotePayload>,
    pub pagination: Pagination,
}

/// Resolve the forwarded caller id to an author reference.
///
/// An id the identity collaborator forwarded but the user store cannot
/// resolve is treated as a stale session.
async fn resolve_author(state: &AppState, caller_id: Uuid) -> Result<Author, ApiError> {
    let user = state
        .users
        .find_by_id(caller_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::Unauthorized("Unknown user".to_string()))?;
    Ok(Author {
        id: user.id,
        name: user.name,
        email: user.email,
    })
}

/// `GET /api/notes` — filtered, sorted, paginated listing.
///
/// Visibility is clamped to the caller before the engine runs: private
/// notes only appear when the caller lists their own scope.
pub async fn list_notes(
    State(state): State<AppState>,
    OptionalAuthUser(caller_id): OptionalAuthUser,
    Query(params): Query<ListNotesParams>,
) -> Result<impl IntoResponse, ApiError> {
    let mut query = params.into_query()?;
    resolve_listing_visibility(&mut query.filter, caller_id)?;
    let page = state.engine.list(query).await?;
    Ok(Json(ListNotesResponse {
        notes: page.notes.into_iter().map(NotePayload::from).collect(),
        pagination: page.pagination,
    }))
}

/// `GET /api/notes/:id` — detail fetch; counts the view.
pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let note = state.engine.get_one(id).await?;
    Ok(Json(serde_json::json!({ "note": NotePayload::from(note) })))
}

/// `POST /api/notes` — create a note owned by the caller.
pub async fn create_note(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Json(body): Json<CreateNoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let author = resolve_author(&state, caller_id).await?;
    let note = state.engine.create(author, body).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Note created successfully",
            "note": NotePayload::from(note),
        })),
    ))
}

/// `PUT /api/notes/:id` — owner-only partial update.
pub async fn update_note(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateNoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let note = state.engine.update(id, caller_id, body).await?;
    Ok(Json(serde_json::json!({
        "message": "Note updated successfully",
        "note": NotePayload::from(note),
    })))
}

/// `DELETE /api/notes/:id` — owner-only soft delete.
pub async fn delete_note(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.engine.delete(id, caller_id).await?;
    Ok(Json(
        serde_json::json!({ "message": "Note deleted successfully" }),
    ))
}

/// `POST /api/notes/:id/like` — toggle the caller's like.
pub async fn like_note(
    State(state): State<AppState>,
    AuthUser(caller_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state.engine.toggle_like(id, caller_id).await?;
    let message = if outcome.is_liked {
        "Note liked"
    } else {
        "Note unliked"
    };
    Ok(Json(serde_json::json!({
        "message": message,
        "note": NotePayload::from(outcome.note),
        "isLiked": outcome.is_liked,
    })))
}

/// `GET /api/notes/tags/all` — tag frequencies over active notes.
pub async fn all_tags(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let tags = state.engine.tag_counts().await?;
    Ok(Json(serde_json::json!({ "tags": tags })))
}
