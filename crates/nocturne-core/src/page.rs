//! Pagination windowing over a filtered-and-sorted sequence.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default page size.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Largest page size a caller may request.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// A validated page/limit pair. `page` is 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl PageRequest {
    /// Build a request from optional raw parameters, validating bounds.
    pub fn from_params(page: Option<u32>, limit: Option<u32>) -> Result<Self> {
        let page = page.unwrap_or(1);
        if page < 1 {
            return Err(Error::validation("page", "Page must be a positive integer"));
        }
        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
            return Err(Error::validation(
                "limit",
                format!("Limit must be between 1 and {}", MAX_PAGE_LIMIT),
            ));
        }
        Ok(Self { page, limit })
    }

    /// Number of items skipped before this page.
    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.limit as usize
    }
}

/// Pagination metadata accompanying every listing response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Pagination {
    /// The requested (1-indexed) page.
    pub current: u32,
    /// Total page count: ceil(total / limit).
    pub pages: u32,
    /// Total items matching the filter, across all pages.
    pub total: i64,
    /// Requested page size.
    pub limit: u32,
}

impl Pagination {
    /// Build metadata for a result set of `total` items.
    pub fn new(req: PageRequest, total: i64) -> Self {
        let pages = ((total.max(0) as u64).div_ceil(req.limit as u64)) as u32;
        Self {
            current: req.page,
            pages,
            total,
            limit: req.limit,
        }
    }
}

/// Take the requested window out of an already filtered-and-sorted list.
///
/// Pages beyond the end yield an empty slice, not an error.
pub fn paginate<T>(items: Vec<T>, req: PageRequest) -> (Vec<T>, Pagination) {
    let total = items.len() as i64;
    let meta = Pagination::new(req, total);
    let window = items
        .into_iter()
        .skip(req.offset())
        .take(req.limit as usize)
        .collect();
    (window, meta)
}
