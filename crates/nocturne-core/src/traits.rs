//! Storage collaborator traits.
//!
//! These traits define the interface the query engine consumes, enabling
//! pluggable backends: PostgreSQL in production, in-memory for tests and
//! embedded use (both live in `nocturne-db`).

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::filter::FilterSpec;
use crate::models::{Note, TagCount, User};
use crate::query::ListQuery;

/// Repository for the note collection.
///
/// `record_view` and `toggle_like` are read-modify-write sequences that
/// race under concurrent access; implementations must perform them with an
/// atomic primitive (single-statement update, lock-held map mutation) so
/// no increment or toggle is lost.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Filtered, sorted, windowed listing.
    async fn find(&self, query: &ListQuery) -> Result<Vec<Note>>;

    /// Count notes matching a filter, across all pages.
    async fn count_matching(&self, filter: &FilterSpec) -> Result<i64>;

    /// Fetch one note by id. Soft-deleted notes are returned (the guard
    /// layer decides what absence means); missing ids yield None.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Note>>;

    /// Insert or fully replace a note, keyed by id.
    async fn save(&self, note: &Note) -> Result<Note>;

    /// Atomically increment the view counter of a live note.
    /// Returns the updated note, or None when absent/soft-deleted.
    async fn record_view(&self, id: Uuid) -> Result<Option<Note>>;

    /// Atomically add or remove `user_id` in a live note's like set.
    /// Returns the updated note, or None when absent/soft-deleted.
    async fn toggle_like(&self, id: Uuid, user_id: Uuid) -> Result<Option<Note>>;

    /// Tag frequencies over active notes, most frequent first.
    async fn aggregate_tag_counts(&self) -> Result<Vec<TagCount>>;

    /// Sum of view counters over an author's active notes.
    async fn total_views(&self, author_id: Uuid) -> Result<i64>;

    /// Sum of like-set sizes over an author's active notes.
    async fn total_likes(&self, author_id: Uuid) -> Result<i64>;

    /// The author's most-viewed active note, if any.
    async fn most_viewed(&self, author_id: Uuid) -> Result<Option<Note>>;
}

/// Read-only access to user accounts.
///
/// Account creation and credential verification belong to the identity
/// collaborator; this service only dereferences ids.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch a user by id. Deactivated users yield None.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
}
