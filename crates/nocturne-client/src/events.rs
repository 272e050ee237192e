//! Optimistic mutation events.
//!
//! Every local mutation is expressed as an event: applied to the cached
//! snapshot immediately, journaled until the server acknowledges it, and
//! replayed on top of the next authoritative reload. This replaces silent
//! last-write-wins between optimistic state and background refreshes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use nocturne_core::{Note, UpdateNoteRequest};

/// A local note mutation awaiting server confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NoteEvent {
    /// A note created locally.
    Created(Note),
    /// A partial update to an existing note.
    Updated { id: Uuid, patch: UpdateNoteRequest },
    /// A soft delete.
    Deleted(Uuid),
    /// The local user's like toggle.
    LikeToggled { id: Uuid, user_id: Uuid },
}

impl NoteEvent {
    /// The note this event concerns.
    pub fn note_id(&self) -> Uuid {
        match self {
            NoteEvent::Created(note) => note.id,
            NoteEvent::Updated { id, .. } => *id,
            NoteEvent::Deleted(id) => *id,
            NoteEvent::LikeToggled { id, .. } => *id,
        }
    }
}

/// Apply one event to a snapshot.
///
/// The guards mirror the server contract: updates and deletes touch live
/// notes only, like toggles only public ones. Events the snapshot cannot
/// absorb (e.g. the note is gone) are no-ops; the authoritative reload is
/// the tie-breaker.
pub fn apply_event(notes: &mut Vec<Note>, event: &NoteEvent) {
    match event {
        NoteEvent::Created(note) => {
            if !notes.iter().any(|n| n.id == note.id) {
                // newest first, matching the server's default ordering
                notes.insert(0, note.clone());
            }
        }
        NoteEvent::Updated { id, patch } => {
            if let Some(note) = notes.iter_mut().find(|n| n.id == *id && n.is_active) {
                note.apply(patch.clone());
            }
        }
        NoteEvent::Deleted(id) => {
            if let Some(note) = notes.iter_mut().find(|n| n.id == *id) {
                note.is_active = false;
            }
        }
        NoteEvent::LikeToggled { id, user_id } => {
            if let Some(note) = notes
                .iter_mut()
                .find(|n| n.id == *id && n.is_active && n.is_public)
            {
                note.toggle_like(*user_id);
            }
        }
    }
}
