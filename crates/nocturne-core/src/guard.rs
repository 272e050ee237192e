//! Authorization guards for mutation and interaction operations.
//!
//! Check order matters: existence/liveness is always checked before
//! ownership, so a non-owner probing a soft-deleted note sees the same
//! NotFound a genuinely absent id produces.

use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::Note;

/// Resolve a lookup result to a live note, or NotFound.
///
/// Soft-deleted notes are indistinguishable from absent ones.
pub fn ensure_active(id: Uuid, found: Option<Note>) -> Result<Note> {
    match found {
        Some(note) if note.is_active => Ok(note),
        _ => Err(Error::NoteNotFound(id)),
    }
}

/// Update and delete require the caller to be the note's author.
pub fn ensure_owner(note: &Note, caller_id: Uuid) -> Result<()> {
    if note.author.id != caller_id {
        return Err(Error::Forbidden(
            "Not authorized to modify this note".to_string(),
        ));
    }
    Ok(())
}

/// Likes are only accepted on public notes, owner included.
pub fn ensure_likeable(note: &Note) -> Result<()> {
    if !note.is_public {
        return Err(Error::Forbidden("Cannot like private notes".to_string()));
    }
    Ok(())
}
