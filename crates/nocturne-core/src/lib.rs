//! # nocturne-core
//!
//! Core types, traits, and the query engine for the nocturne note service.
//!
//! This crate defines the note domain model and the filtering, sorting,
//! pagination, and authorization contract that both the server-side query
//! engine and the client-side view engine evaluate. Storage backends live
//! in `nocturne-db`; the HTTP surface lives in `nocturne-api`.

pub mod engine;
pub mod error;
pub mod filter;
pub mod guard;
pub mod logging;
pub mod models;
pub mod page;
pub mod query;
pub mod sort;
pub mod tags;
pub mod traits;

// Re-export commonly used types at crate root
pub use engine::{LikeOutcome, QueryEngine};
pub use error::{Error, Result};
pub use filter::FilterSpec;
pub use models::*;
pub use page::{PageRequest, Pagination, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
pub use query::{evaluate, ListQuery, NotePage};
pub use sort::{SortKey, SortOrder};
pub use tags::{normalize_tag, normalize_tags, MAX_TAG_LEN};
pub use traits::{NoteStore, UserStore};
