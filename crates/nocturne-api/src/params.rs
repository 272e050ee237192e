//! Query parameter types for the listing endpoints.
//!
//! Raw parameters are validated into a core [`ListQuery`] before any
//! storage work happens; a bad value fails the request with a field-level
//! message and the operation is never attempted.

use serde::Deserialize;
use uuid::Uuid;

use nocturne_core::{
    Error, FilterSpec, ListQuery, PageRequest, Result, SortKey, SortOrder,
};

/// Raw query parameters of `GET /api/notes`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNotesParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub is_public: Option<bool>,
    pub author: Option<Uuid>,
    /// Comma-separated tag list; normalized before matching.
    pub tags: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl ListNotesParams {
    /// Validate and convert into a core listing query.
    pub fn into_query(self) -> Result<ListQuery> {
        let mut filter = FilterSpec {
            is_public: self.is_public,
            author: self.author,
            ..FilterSpec::default()
        };
        if let Some(tags) = &self.tags {
            let tags: Vec<&str> = tags.split(',').collect();
            filter = filter.with_tags(&tags);
        }
        if let Some(search) = self.search {
            filter = filter.with_search(search);
        }

        Ok(ListQuery {
            filter,
            sort_by: parse_sort_key(self.sort_by.as_deref())?,
            sort_order: parse_sort_order(self.sort_order.as_deref())?,
            page: PageRequest::from_params(self.page, self.limit)?,
        })
    }
}

/// Raw query parameters of `GET /api/users/:id/notes`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserNotesParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl UserNotesParams {
    /// Validate and convert into a listing of the user's public notes.
    pub fn into_query(self, user_id: Uuid) -> Result<ListQuery> {
        Ok(ListQuery {
            filter: FilterSpec::owned_by(user_id).with_visibility(true),
            sort_by: parse_sort_key(self.sort_by.as_deref())?,
            sort_order: parse_sort_order(self.sort_order.as_deref())?,
            page: PageRequest::from_params(self.page, self.limit)?,
        })
    }
}

/// Clamp a listing filter to what the caller may see.
///
/// `unrestricted` visibility is reserved for trusted internal callers;
/// over HTTP, private notes are listable only by their own author. A
/// caller scoped to themselves (`author` = their id) passes through
/// untouched; anyone else is narrowed to public notes, and an explicit
/// request for someone else's private notes is refused outright.
pub fn resolve_listing_visibility(filter: &mut FilterSpec, caller: Option<Uuid>) -> Result<()> {
    let owns_scope = matches!((filter.author, caller), (Some(a), Some(c)) if a == c);
    if owns_scope {
        return Ok(());
    }
    match filter.is_public {
        Some(false) => Err(Error::Forbidden(
            "Private notes are only listable by their author".to_string(),
        )),
        _ => {
            filter.is_public = Some(true);
            Ok(())
        }
    }
}

fn parse_sort_key(raw: Option<&str>) -> Result<SortKey> {
    match raw {
        None => Ok(SortKey::default()),
        Some(s) => s
            .parse::<SortKey>()
            .map_err(|_| Error::validation("sortBy", "Invalid sort field")),
    }
}

fn parse_sort_order(raw: Option<&str>) -> Result<SortOrder> {
    match raw {
        None => Ok(SortOrder::default()),
        Some(s) => s
            .parse::<SortOrder>()
            .map_err(|_| Error::validation("sortOrder", "Sort order must be asc or desc")),
    }
}
