//! In-memory storage backend.
//!
//! Evaluates the reference engine from `nocturne_core::query` over a
//! lock-held note vector. Used by the test suites and by embedded/preview
//! deployments that run without PostgreSQL; it is also the behavioral
//! reference the SQL translation is checked against.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use nocturne_core::{
    evaluate, FilterSpec, ListQuery, Note, NoteStore, Result, TagCount, User, UserStore,
};

/// Cap on the tag-frequency aggregation, matching the SQL backend.
const TAG_AGGREGATION_LIMIT: usize = 100;

/// In-memory implementation of [`NoteStore`].
///
/// The write lock makes every read-modify-write atomic; no increment or
/// toggle can be lost to interleaving.
#[derive(Default)]
pub struct MemoryNoteStore {
    notes: RwLock<Vec<Note>>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with the given notes.
    pub fn seeded(notes: Vec<Note>) -> Self {
        Self {
            notes: RwLock::new(notes),
        }
    }

    /// Snapshot the full collection (active and soft-deleted alike).
    pub async fn snapshot(&self) -> Vec<Note> {
        self.notes.read().await.clone()
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn find(&self, query: &ListQuery) -> Result<Vec<Note>> {
        let notes = self.notes.read().await;
        Ok(evaluate(&notes, query).notes)
    }

    async fn count_matching(&self, filter: &FilterSpec) -> Result<i64> {
        let notes = self.notes.read().await;
        Ok(notes.iter().filter(|n| filter.matches(n)).count() as i64)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Note>> {
        let notes = self.notes.read().await;
        Ok(notes.iter().find(|n| n.id == id).cloned())
    }

    async fn save(&self, note: &Note) -> Result<Note> {
        let mut notes = self.notes.write().await;
        match notes.iter_mut().find(|n| n.id == note.id) {
            Some(slot) => *slot = note.clone(),
            None => notes.push(note.clone()),
        }
        Ok(note.clone())
    }

    async fn record_view(&self, id: Uuid) -> Result<Option<Note>> {
        let mut notes = self.notes.write().await;
        Ok(notes
            .iter_mut()
            .find(|n| n.id == id && n.is_active)
            .map(|n| {
                n.views += 1;
                n.clone()
            }))
    }

    async fn toggle_like(&self, id: Uuid, user_id: Uuid) -> Result<Option<Note>> {
        let mut notes = self.notes.write().await;
        Ok(notes
            .iter_mut()
            .find(|n| n.id == id && n.is_active)
            .map(|n| {
                n.toggle_like(user_id);
                n.clone()
            }))
    }

    async fn aggregate_tag_counts(&self) -> Result<Vec<TagCount>> {
        let notes = self.notes.read().await;
        let mut counts: HashMap<&str, i64> = HashMap::new();
        for note in notes.iter().filter(|n| n.is_active) {
            for tag in &note.tags {
                *counts.entry(tag).or_insert(0) += 1;
            }
        }
        let mut tags: Vec<TagCount> = counts
            .into_iter()
            .map(|(name, count)| TagCount {
                name: name.to_string(),
                count,
            })
            .collect();
        tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        tags.truncate(TAG_AGGREGATION_LIMIT);
        Ok(tags)
    }

    async fn total_views(&self, author_id: Uuid) -> Result<i64> {
        let notes = self.notes.read().await;
        Ok(notes
            .iter()
            .filter(|n| n.author.id == author_id && n.is_active)
            .map(|n| n.views)
            .sum())
    }

    async fn total_likes(&self, author_id: Uuid) -> Result<i64> {
        let notes = self.notes.read().await;
        Ok(notes
            .iter()
            .filter(|n| n.author.id == author_id && n.is_active)
            .map(|n| n.likes.len() as i64)
            .sum())
    }

    async fn most_viewed(&self, author_id: Uuid) -> Result<Option<Note>> {
        let notes = self.notes.read().await;
        Ok(notes
            .iter()
            .filter(|n| n.author.id == author_id && n.is_active)
            .max_by_key(|n| n.views)
            .cloned())
    }
}

/// In-memory implementation of [`UserStore`].
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }

    pub async fn add(&self, user: User) {
        self.users.write().await.push(user);
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id && u.is_active).cloned())
    }
}

// =============================================================================
// ENGINE CONTRACT TESTS
// =============================================================================
