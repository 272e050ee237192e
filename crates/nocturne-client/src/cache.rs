//! The client-side note cache.
//!
//! An explicit cache object with a reload/invalidate contract, injected
//! into the UI layer. Reads evaluate the same core engine the server
//! runs, so a locally-answered listing matches what the server would have
//! returned for the cached subset.
//!
//! Reload policy: a reload **replaces** the snapshot wholesale, then
//! replays any unconfirmed local events on top. The one exception is an
//! explicitly named open note, which survives a background reload
//! untouched so an in-progress edit is never stomped.

use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use nocturne_core::{evaluate, ListQuery, Note, NotePage};

use crate::events::{apply_event, NoteEvent};

/// Per-user note counts for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub total: usize,
    pub public: usize,
    pub private: usize,
}

/// Locally cached subset of the note collection.
#[derive(Debug, Default)]
pub struct NoteCache {
    notes: Vec<Note>,
    journal: Vec<(u64, NoteEvent)>,
    next_seq: u64,
    stale: bool,
}

impl NoteCache {
    pub fn new() -> Self {
        Self {
            stale: true,
            ..Self::default()
        }
    }

    /// Whether the cache needs an authoritative reload.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Number of cached notes, soft-deleted ones included.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Drop the snapshot and mark the cache stale. Unconfirmed events
    /// survive so they can be replayed onto the next reload.
    pub fn invalidate(&mut self) {
        self.notes.clear();
        self.stale = true;
    }

    /// Replace the snapshot with an authoritative reload, then replay
    /// unconfirmed local events on top.
    pub fn reload(&mut self, snapshot: Vec<Note>) {
        self.notes = snapshot;
        let journal = std::mem::take(&mut self.journal);
        for (_, event) in &journal {
            apply_event(&mut self.notes, event);
        }
        self.journal = journal;
        self.stale = false;
        debug!(
            subsystem = "cache",
            op = "reload",
            result_count = self.notes.len(),
            pending = self.journal.len(),
            "cache reloaded"
        );
    }

    /// Like [`reload`](Self::reload), but the local copy of `open_id`
    /// survives the refresh: a background reload of the list must not
    /// stomp the note currently being edited.
    pub fn reload_keeping(&mut self, snapshot: Vec<Note>, open_id: Uuid) {
        let open = self.notes.iter().find(|n| n.id == open_id).cloned();
        self.reload(snapshot);
        if let Some(open) = open {
            match self.notes.iter_mut().find(|n| n.id == open_id) {
                Some(slot) => *slot = open,
                None => self.notes.insert(0, open),
            }
        }
    }

    /// Apply a local mutation immediately and journal it until the server
    /// acknowledges. Returns the journal sequence number to confirm.
    pub fn apply(&mut self, event: NoteEvent) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        apply_event(&mut self.notes, &event);
        self.journal.push((seq, event));
        seq
    }

    /// Acknowledge a journaled event; it will no longer replay.
    pub fn confirm(&mut self, seq: u64) {
        self.journal.retain(|(s, _)| *s != seq);
    }

    /// Unconfirmed events, oldest first.
    pub fn pending(&self) -> Vec<&NoteEvent> {
        self.journal.iter().map(|(_, e)| e).collect()
    }

    /// Evaluate a listing query over the snapshot — the identical
    /// contract the server evaluates.
    pub fn query(&self, query: &ListQuery) -> NotePage {
        evaluate(&self.notes, query)
    }

    /// Fetch one live note.
    pub fn get(&self, id: Uuid) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id && n.is_active)
    }

    /// Distinct tags across live notes, sorted.
    pub fn all_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .notes
            .iter()
            .filter(|n| n.is_active)
            .flat_map(|n| n.tags.iter().cloned())
            .collect();
        tags.sort();
        tags.dedup();
        tags
    }

    /// Most recently updated live notes, optionally one user's only.
    pub fn recent(&self, limit: usize, user_id: Option<Uuid>) -> Vec<&Note> {
        let mut notes: Vec<&Note> = self
            .notes
            .iter()
            .filter(|n| n.is_active)
            .filter(|n| user_id.map_or(true, |u| n.author.id == u))
            .collect();
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        notes.truncate(limit);
        notes
    }

    /// Note counts, optionally scoped to one user.
    pub fn stats(&self, user_id: Option<Uuid>) -> CacheStats {
        let scoped: Vec<&Note> = self
            .notes
            .iter()
            .filter(|n| n.is_active)
            .filter(|n| user_id.map_or(true, |u| n.author.id == u))
            .collect();
        let public = scoped.iter().filter(|n| n.is_public).count();
        CacheStats {
            total: scoped.len(),
            public,
            private: scoped.len() - public,
        }
    }

    /// Convenience: newest-first listing, the UI's default view.
    pub fn newest_first(&self) -> Vec<&Note> {
        let mut notes: Vec<&Note> = self.notes.iter().filter(|n| n.is_active).collect();
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        notes
    }
}
