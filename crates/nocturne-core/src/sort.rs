//! Multi-key, direction-aware note ordering.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::Note;

/// Field a note listing is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    CreatedAt,
    #[default]
    UpdatedAt,
    Title,
    Views,
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreatedAt => write!(f, "createdAt"),
            Self::UpdatedAt => write!(f, "updatedAt"),
            Self::Title => write!(f, "title"),
            Self::Views => write!(f, "views"),
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" => Ok(Self::CreatedAt),
            "updatedAt" => Ok(Self::UpdatedAt),
            "title" => Ok(Self::Title),
            "views" => Ok(Self::Views),
            _ => Err(format!("Invalid sort field: {}", s)),
        }
    }
}

/// Sort direction. Flips the comparison result only; the key is unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(format!("Sort order must be asc or desc, got: {}", s)),
        }
    }
}

/// Compare two notes under the given key, ascending.
///
/// Titles compare case-insensitively; timestamps chronologically; views
/// numerically. Ties are left to the caller's (stable) sort, so repeated
/// queries over the same input order are deterministic.
pub fn compare(a: &Note, b: &Note, key: SortKey) -> Ordering {
    match key {
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortKey::Views => a.views.cmp(&b.views),
    }
}

/// Stable in-place sort under the given key and direction.
pub fn sort_notes(notes: &mut [Note], key: SortKey, order: SortOrder) {
    notes.sort_by(|a, b| {
        let ord = compare(a, b, key);
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Author, CreateNoteRequest, Note};
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn note(title: &str, views: i64, age_days: i64) -> Note {
        let mut n = Note::create(
            Author {
                id: Uuid::new_v4(),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            },
            CreateNoteRequest {
                title: title.to_string(),
                content: "<p>x</p>".to_string(),
                tags: vec![],
                is_public: true,
            },
        );
        n.views = views;
        n.created_at = Utc::now() - Duration::days(age_days);
        n.updated_at = n.created_at;
        n
    }

    #[test]
    fn test_title_sort_is_case_insensitive() {
        let mut notes = vec![note("Banana", 0, 0), note("apple", 0, 0)];
        sort_notes(&mut notes, SortKey::Title, SortOrder::Asc);
        assert_eq!(notes[0].title, "apple");
        assert_eq!(notes[1].title, "Banana");
    }

    #[test]
    fn test_desc_flips_comparison_only() {
        let mut notes = vec![note("a", 1, 0), note("b", 3, 0), note("c", 2, 0)];
        sort_notes(&mut notes, SortKey::Views, SortOrder::Desc);
        let views: Vec<i64> = notes.iter().map(|n| n.views).collect();
        assert_eq!(views, vec![3, 2, 1]);
    }

    #[test]
    fn test_created_at_chronological() {
        let mut notes = vec![note("old", 0, 10), note("new", 0, 1), note("mid", 0, 5)];
        sort_notes(&mut notes, SortKey::CreatedAt, SortOrder::Asc);
        let titles: Vec<&str> = notes.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["old", "mid", "new"]);
    }

    #[test]
    fn test_ties_preserve_input_order() {
        let mut notes = vec![note("first", 7, 0), note("second", 7, 0), note("third", 7, 0)];
        sort_notes(&mut notes, SortKey::Views, SortOrder::Desc);
        let titles: Vec<&str> = notes.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_sort_key_round_trip() {
        for key in [SortKey::CreatedAt, SortKey::UpdatedAt, SortKey::Title, SortKey::Views] {
            assert_eq!(key.to_string().parse::<SortKey>().unwrap(), key);
        }
        assert!("priority".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_sort_order_round_trip() {
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("descending".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(SortKey::default(), SortKey::UpdatedAt);
        assert_eq!(SortOrder::default(), SortOrder::Desc);
    }
}
