//! Listing query and its reference evaluation.
//!
//! [`evaluate`] is the in-process form of the listing contract: filter,
//! stable sort, then paginate. The client-side view engine runs it over
//! its cached snapshot, the in-memory store runs it directly, and the SQL
//! backend must produce the same result for the same input.

use serde::{Deserialize, Serialize};

use crate::filter::FilterSpec;
use crate::models::Note;
use crate::page::{paginate, PageRequest, Pagination};
use crate::sort::{sort_notes, SortKey, SortOrder};

/// A complete listing request: filter, order, window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub filter: FilterSpec,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
    pub page: PageRequest,
}

impl ListQuery {
    /// A query over the given filter with default order and window.
    pub fn filtered(filter: FilterSpec) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }
}

/// A page of notes plus its metadata.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct NotePage {
    pub notes: Vec<Note>,
    pub pagination: Pagination,
}

/// Evaluate a listing query over a note snapshot.
pub fn evaluate(notes: &[Note], query: &ListQuery) -> NotePage {
    let mut matched: Vec<Note> = notes
        .iter()
        .filter(|n| query.filter.matches(n))
        .cloned()
        .collect();
    sort_notes(&mut matched, query.sort_by, query.sort_order);
    let (notes, pagination) = paginate(matched, query.page);
    NotePage { notes, pagination }
}
