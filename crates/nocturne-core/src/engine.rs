//! The note query engine.
//!
//! Orchestrates filtering, sorting, pagination, and the authorization
//! guards into the operations the HTTP layer (and any other trusted
//! caller) consumes. The engine owns the contract; the storage backend
//! only supplies primitives.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::filter::FilterSpec;
use crate::guard;
use crate::models::{
    Author, CreateNoteRequest, Note, PopularNote, TagCount, UpdateNoteRequest, UserStats,
};
use crate::page::Pagination;
use crate::query::{ListQuery, NotePage};
use crate::traits::NoteStore;

/// Result of a like toggle: the updated note and the caller's new state.
#[derive(Debug, Clone)]
pub struct LikeOutcome {
    pub note: Note,
    pub is_liked: bool,
}

/// Query engine over a note store.
#[derive(Clone)]
pub struct QueryEngine {
    store: Arc<dyn NoteStore>,
}

impl QueryEngine {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    /// Paginated, filtered, sorted listing. Empty results are a valid
    /// page, never an error.
    pub async fn list(&self, query: ListQuery) -> Result<NotePage> {
        let notes = self.store.find(&query).await?;
        let total = self.store.count_matching(&query.filter).await?;
        debug!(
            subsystem = "engine",
            op = "list",
            result_count = notes.len(),
            total,
            "listed notes"
        );
        Ok(NotePage {
            notes,
            pagination: Pagination::new(query.page, total),
        })
    }

    /// Detail fetch. Increments the view counter atomically as part of
    /// the fetch; absent and soft-deleted ids are indistinguishable.
    pub async fn get_one(&self, id: Uuid) -> Result<Note> {
        self.store
            .record_view(id)
            .await?
            .ok_or(Error::NoteNotFound(id))
    }

    /// Create a note owned by `author`.
    pub async fn create(&self, author: Author, req: CreateNoteRequest) -> Result<Note> {
        req.validate()?;
        let note = Note::create(author, req);
        debug!(subsystem = "engine", op = "create", note_id = %note.id, "creating note");
        self.store.save(&note).await
    }

    /// Owner-only partial update. The patch and the `updated_at` refresh
    /// land in one write; a failed validation leaves the note untouched.
    pub async fn update(
        &self,
        id: Uuid,
        caller_id: Uuid,
        patch: UpdateNoteRequest,
    ) -> Result<Note> {
        patch.validate()?;
        let mut note = guard::ensure_active(id, self.store.find_by_id(id).await?)?;
        guard::ensure_owner(&note, caller_id)?;
        note.apply(patch);
        self.store.save(&note).await
    }

    /// Owner-only soft delete. Terminal: the engine never reactivates.
    pub async fn delete(&self, id: Uuid, caller_id: Uuid) -> Result<()> {
        let mut note = guard::ensure_active(id, self.store.find_by_id(id).await?)?;
        guard::ensure_owner(&note, caller_id)?;
        note.is_active = false;
        note.updated_at = chrono::Utc::now();
        self.store.save(&note).await?;
        debug!(subsystem = "engine", op = "delete", note_id = %id, "note soft-deleted");
        Ok(())
    }

    /// Toggle the caller's like on a public note.
    ///
    /// Two successive calls by the same user restore the original like
    /// set. The membership flip itself is atomic in the store.
    pub async fn toggle_like(&self, id: Uuid, caller_id: Uuid) -> Result<LikeOutcome> {
        let note = guard::ensure_active(id, self.store.find_by_id(id).await?)?;
        guard::ensure_likeable(&note)?;
        let note = self
            .store
            .toggle_like(id, caller_id)
            .await?
            .ok_or(Error::NoteNotFound(id))?;
        let is_liked = note.liked_by(caller_id);
        Ok(LikeOutcome { note, is_liked })
    }

    /// Tag frequencies over active notes, most frequent first.
    pub async fn tag_counts(&self) -> Result<Vec<TagCount>> {
        self.store.aggregate_tag_counts().await
    }

    /// Count notes matching a filter (used by profile pages).
    pub async fn count(&self, filter: &FilterSpec) -> Result<i64> {
        self.store.count_matching(filter).await
    }

    /// Dashboard statistics for one author.
    pub async fn user_stats(&self, user_id: Uuid) -> Result<UserStats> {
        let owned = FilterSpec::owned_by(user_id);
        let total_notes = self.store.count_matching(&owned).await?;
        let public_notes = self
            .store
            .count_matching(&owned.clone().with_visibility(true))
            .await?;
        let private_notes = self
            .store
            .count_matching(&owned.with_visibility(false))
            .await?;
        let total_views = self.store.total_views(user_id).await?;
        let total_likes = self.store.total_likes(user_id).await?;
        let most_popular_note = self.store.most_viewed(user_id).await?.map(|n| PopularNote {
            id: n.id,
            title: n.title,
            views: n.views,
        });

        Ok(UserStats {
            total_notes,
            public_notes,
            private_notes,
            total_views,
            total_likes,
            most_popular_note,
        })
    }
}
