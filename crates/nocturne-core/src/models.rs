//! Core data models for the nocturne note service.
//!
//! Wire serialization uses camelCase field names; that is the JSON contract
//! the existing clients speak (`isPublic`, `createdAt`, `likeCount`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::tags::normalize_tags;

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 200;

// =============================================================================
// AUTHOR / USER TYPES
// =============================================================================

/// Resolved author reference embedded in every note.
///
/// The storage layer resolves the author exactly once when a note is read;
/// ownership checks compare `id` only, never the display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Author {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// A user account as seen by this service.
///
/// Accounts are created and verified by the identity collaborator; this
/// service only reads them for profile pages and author resolution.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// NOTE
// =============================================================================

/// A rich-text note.
///
/// `content` is an opaque HTML string produced by the editing surface; the
/// service stores and searches it but never parses it. `likes` has set
/// semantics: a user id appears at most once.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub is_public: bool,
    pub author: Author,
    pub likes: Vec<Uuid>,
    pub views: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Build a new note from a validated create request.
    ///
    /// Assigns a UUIDv7 id, stamps both timestamps with the same instant,
    /// and normalizes tags.
    pub fn create(author: Author, req: CreateNoteRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: req.title.trim().to_string(),
            content: req.content,
            tags: normalize_tags(&req.tags),
            is_public: req.is_public,
            author,
            likes: Vec::new(),
            views: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Number of users who like this note.
    pub fn like_count(&self) -> usize {
        self.likes.len()
    }

    /// Whether the given user currently likes this note.
    pub fn liked_by(&self, user_id: Uuid) -> bool {
        self.likes.contains(&user_id)
    }

    /// Toggle the given user's like membership.
    ///
    /// Returns true when the note is liked after the call, false when the
    /// call removed an existing like. Callers must have already checked
    /// that the note is public (see [`crate::guard`]).
    pub fn toggle_like(&mut self, user_id: Uuid) -> bool {
        if let Some(pos) = self.likes.iter().position(|id| *id == user_id) {
            self.likes.remove(pos);
            false
        } else {
            self.likes.push(user_id);
            true
        }
    }

    /// Apply a validated patch, refreshing `updated_at`.
    ///
    /// Absent fields are left untouched; tags are re-normalized.
    pub fn apply(&mut self, patch: UpdateNoteRequest) {
        if let Some(title) = patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(tags) = patch.tags {
            self.tags = normalize_tags(&tags);
        }
        if let Some(is_public) = patch.is_public {
            self.is_public = is_public;
        }
        self.updated_at = Utc::now();
    }
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Request to create a note.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_public: bool,
}

impl CreateNoteRequest {
    /// Check the request against the model constraints.
    pub fn validate(&self) -> Result<()> {
        validate_title(self.title.trim())?;
        validate_content(&self.content)
    }
}

/// Request to update a note; every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_public: Option<bool>,
}

impl UpdateNoteRequest {
    /// Check the provided fields against the model constraints.
    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            validate_title(title.trim())?;
        }
        if let Some(content) = &self.content {
            validate_content(content)?;
        }
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.is_empty() {
        return Err(Error::validation("title", "Title is required"));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(Error::validation(
            "title",
            format!("Title must be less than {} characters", MAX_TITLE_LEN),
        ));
    }
    Ok(())
}

fn validate_content(content: &str) -> Result<()> {
    if content.is_empty() {
        return Err(Error::validation("content", "Content is required"));
    }
    Ok(())
}

// =============================================================================
// RESPONSE TYPES
// =============================================================================

/// Wire representation of a note, carrying the computed like count.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotePayload {
    #[serde(flatten)]
    pub note: Note,
    pub like_count: usize,
}

impl From<Note> for NotePayload {
    fn from(note: Note) -> Self {
        let like_count = note.like_count();
        Self { note, like_count }
    }
}

/// One entry in the tag-frequency aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TagCount {
    pub name: String,
    pub count: i64,
}

/// Per-user dashboard statistics.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_notes: i64,
    pub public_notes: i64,
    pub private_notes: i64,
    pub total_views: i64,
    pub total_likes: i64,
    pub most_popular_note: Option<PopularNote>,
}

/// Title/views projection of a user's most-viewed note.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct PopularNote {
    pub id: Uuid,
    pub title: String,
    pub views: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author() -> Author {
        Author {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        }
    }

    fn create_req() -> CreateNoteRequest {
        CreateNoteRequest {
            title: "  Grocery list  ".to_string(),
            content: "<p>eggs</p>".to_string(),
            tags: vec!["  Work ".to_string(), "WORK".to_string(), "urgent".to_string()],
            is_public: false,
        }
    }

    #[test]
    fn test_create_normalizes_title_and_tags() {
        let note = Note::create(author(), create_req());
        assert_eq!(note.title, "Grocery list");
        assert_eq!(note.tags, vec!["work", "urgent"]);
        assert_eq!(note.views, 0);
        assert!(note.likes.is_empty());
        assert!(note.is_active);
        assert_eq!(note.created_at, note.updated_at);
    }

    #[test]
    fn test_toggle_like_round_trip() {
        let mut note = Note::create(author(), create_req());
        let user = Uuid::new_v4();

        assert!(note.toggle_like(user));
        assert_eq!(note.like_count(), 1);
        assert!(note.liked_by(user));

        assert!(!note.toggle_like(user));
        assert_eq!(note.like_count(), 0);
        assert!(!note.liked_by(user));
    }

    #[test]
    fn test_toggle_like_keeps_other_users() {
        let mut note = Note::create(author(), create_req());
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        note.toggle_like(a);
        note.toggle_like(b);
        note.toggle_like(a);

        assert_eq!(note.likes, vec![b]);
    }

    #[test]
    fn test_apply_patch_refreshes_updated_at() {
        let mut note = Note::create(author(), create_req());
        let created = note.created_at;

        note.apply(UpdateNoteRequest {
            title: Some("Renamed".to_string()),
            tags: Some(vec!["A".to_string(), "a".to_string()]),
            ..Default::default()
        });

        assert_eq!(note.title, "Renamed");
        assert_eq!(note.tags, vec!["a"]);
        assert_eq!(note.created_at, created);
        assert!(note.updated_at >= created);
        // untouched fields survive
        assert_eq!(note.content, "<p>eggs</p>");
    }

    #[test]
    fn test_validate_rejects_empty_title() {
        let req = CreateNoteRequest {
            title: "   ".to_string(),
            ..create_req()
        };
        match req.validate() {
            Err(Error::Validation { field, .. }) => assert_eq!(field, "title"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_overlong_title() {
        let req = CreateNoteRequest {
            title: "x".repeat(MAX_TITLE_LEN + 1),
            ..create_req()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_content() {
        let req = CreateNoteRequest {
            content: String::new(),
            ..create_req()
        };
        match req.validate() {
            Err(Error::Validation { field, .. }) => assert_eq!(field, "content"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_update_validate_ignores_absent_fields() {
        assert!(UpdateNoteRequest::default().validate().is_ok());
    }

    #[test]
    fn test_note_payload_like_count() {
        let mut note = Note::create(author(), create_req());
        note.toggle_like(Uuid::new_v4());
        note.toggle_like(Uuid::new_v4());

        let payload = NotePayload::from(note);
        assert_eq!(payload.like_count, 2);
    }

    #[test]
    fn test_note_serializes_camel_case() {
        let note = Note::create(author(), create_req());
        let json = serde_json::to_value(&note).unwrap();
        assert!(json.get("isPublic").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("is_public").is_none());
    }
}
