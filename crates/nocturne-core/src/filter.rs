//! Note filter specification.
//!
//! A [`FilterSpec`] composes the visibility, ownership, tag, and free-text
//! predicates with AND semantics across categories. Soft-deleted notes are
//! excluded from every evaluation regardless of the other predicates.
//!
//! The same specification is evaluated in two places: in-process against a
//! note slice (here), and translated to SQL by `nocturne-db`. The two
//! evaluations must agree; the in-process form is the reference.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Note;
use crate::tags::normalize_tags;

/// Composable filter over the note collection.
///
/// Absent fields mean "predicate not applied". The three visibility modes
/// of the listing contract map onto the first two fields:
///
/// - public-only: `is_public = Some(true)`
/// - owned-by: `author = Some(user_id)` (any visibility)
/// - unrestricted: both `None`
///
/// The two compose — a profile page lists another user's notes that are
/// both public and theirs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    /// Keep only notes with this visibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    /// Keep only notes authored by this user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Uuid>,
    /// Keep notes carrying at least one of these tags (OR within the set).
    /// Normalized on construction; empty = predicate absent.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Case-insensitive substring match over title, raw content, and the
    /// author's display name. Empty/whitespace = predicate absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl FilterSpec {
    /// No visibility restriction; trusted internal listing paths only.
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Only notes with `is_public = true`.
    pub fn public_only() -> Self {
        Self {
            is_public: Some(true),
            ..Self::default()
        }
    }

    /// Only notes authored by the given user, regardless of visibility.
    pub fn owned_by(user_id: Uuid) -> Self {
        Self {
            author: Some(user_id),
            ..Self::default()
        }
    }

    /// Restrict to the given author's notes.
    pub fn with_author(mut self, user_id: Uuid) -> Self {
        self.author = Some(user_id);
        self
    }

    /// Restrict to a visibility value.
    pub fn with_visibility(mut self, is_public: bool) -> Self {
        self.is_public = Some(is_public);
        self
    }

    /// Add a tag predicate. Tags are normalized; an empty result leaves
    /// the predicate absent.
    pub fn with_tags<S: AsRef<str>>(mut self, tags: &[S]) -> Self {
        self.tags = normalize_tags(tags);
        self
    }

    /// Add a free-text predicate. Whitespace-only queries are dropped.
    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.search = if query.trim().is_empty() {
            None
        } else {
            Some(query)
        };
        self
    }

    /// Evaluate the filter against a single note.
    pub fn matches(&self, note: &Note) -> bool {
        if !note.is_active {
            return false;
        }
        if let Some(is_public) = self.is_public {
            if note.is_public != is_public {
                return false;
            }
        }
        if let Some(author) = self.author {
            if note.author.id != author {
                return false;
            }
        }
        if !self.tags.is_empty() && !self.tags.iter().any(|t| note.tags.contains(t)) {
            return false;
        }
        if let Some(query) = &self.search {
            let query = query.to_lowercase();
            let hit = note.title.to_lowercase().contains(&query)
                || note.content.to_lowercase().contains(&query)
                || note.author.name.to_lowercase().contains(&query);
            if !hit {
                return false;
            }
        }
        true
    }

    /// Evaluate the filter against a note collection.
    pub fn apply<'a>(&self, notes: &'a [Note]) -> Vec<&'a Note> {
        notes.iter().filter(|n| self.matches(n)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Author, CreateNoteRequest, Note};

    fn note(title: &str, content: &str, author_name: &str, tags: &[&str], public: bool) -> Note {
        let author = Author {
            id: Uuid::new_v4(),
            name: author_name.to_string(),
            email: format!("{}@example.com", author_name.to_lowercase()),
        };
        Note::create(
            author,
            CreateNoteRequest {
                title: title.to_string(),
                content: content.to_string(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                is_public: public,
            },
        )
    }

    #[test]
    fn test_soft_deleted_never_matches() {
        let mut n = note("t", "<p>c</p>", "Ada", &[], true);
        n.is_active = false;
        assert!(!FilterSpec::unrestricted().matches(&n));
        assert!(!FilterSpec::public_only().matches(&n));
        assert!(!FilterSpec::owned_by(n.author.id).matches(&n));
    }

    #[test]
    fn test_public_only_excludes_private() {
        let public = note("a", "c", "Ada", &[], true);
        let private = note("b", "c", "Ada", &[], false);
        let spec = FilterSpec::public_only();
        assert!(spec.matches(&public));
        assert!(!spec.matches(&private));
    }

    #[test]
    fn test_owned_by_ignores_visibility() {
        let private = note("b", "c", "Ada", &[], false);
        assert!(FilterSpec::owned_by(private.author.id).matches(&private));
        assert!(!FilterSpec::owned_by(Uuid::new_v4()).matches(&private));
    }

    #[test]
    fn test_owner_and_visibility_compose() {
        let private = note("b", "c", "Ada", &[], false);
        let spec = FilterSpec::owned_by(private.author.id).with_visibility(true);
        assert!(!spec.matches(&private));
    }

    #[test]
    fn test_tags_or_semantics() {
        let n = note("t", "c", "Ada", &["rust", "tips"], true);
        // one tag in common is enough
        assert!(FilterSpec::unrestricted()
            .with_tags(&["rust", "python"])
            .matches(&n));
        // none in common fails
        assert!(!FilterSpec::unrestricted()
            .with_tags(&["python", "go"])
            .matches(&n));
    }

    #[test]
    fn test_tag_predicate_normalizes_input() {
        let n = note("t", "c", "Ada", &["rust"], true);
        assert!(FilterSpec::unrestricted().with_tags(&[" RUST "]).matches(&n));
    }

    #[test]
    fn test_empty_tags_is_predicate_absent() {
        let n = note("t", "c", "Ada", &[], true);
        let raw: [&str; 0] = [];
        assert!(FilterSpec::unrestricted().with_tags(&raw).matches(&n));
    }

    #[test]
    fn test_search_title_content_author_case_insensitive() {
        let n = note("Meeting Notes", "<p>Quarterly <b>Budget</b></p>", "Ada", &[], true);

        assert!(FilterSpec::unrestricted().with_search("meeting").matches(&n));
        assert!(FilterSpec::unrestricted().with_search("BUDGET").matches(&n));
        assert!(FilterSpec::unrestricted().with_search("ada").matches(&n));
        assert!(!FilterSpec::unrestricted().with_search("payroll").matches(&n));
    }

    #[test]
    fn test_search_includes_html_markup() {
        // content is opaque; markup is searchable as-is
        let n = note("t", "<blockquote>x</blockquote>", "Ada", &[], true);
        assert!(FilterSpec::unrestricted()
            .with_search("blockquote")
            .matches(&n));
    }

    #[test]
    fn test_empty_search_is_predicate_absent() {
        let n = note("t", "c", "Ada", &[], true);
        assert!(FilterSpec::unrestricted().with_search("").matches(&n));
        assert!(FilterSpec::unrestricted().with_search("   ").matches(&n));
        assert_eq!(
            FilterSpec::unrestricted().with_search(""),
            FilterSpec::unrestricted()
        );
    }

    #[test]
    fn test_apply_narrows_left_to_right() {
        let a = note("rust tips", "c", "Ada", &["rust"], true);
        let b = note("go tips", "c", "Bob", &["go"], true);
        let c = note("rust secrets", "c", "Ada", &["rust"], false);
        let notes = vec![a, b, c];

        let spec = FilterSpec::public_only().with_tags(&["rust"]);
        let hits = spec.apply(&notes);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "rust tips");
    }
}
