//! # nocturne-client
//!
//! The client-side view engine for the nocturne note service: an explicit
//! [`NoteCache`] over a locally loaded snapshot, optimistic mutation
//! events with reload reconciliation, and local listing evaluation through
//! the identical `nocturne-core` query contract the server runs.

pub mod cache;
pub mod events;

pub use cache::{CacheStats, NoteCache};
pub use events::NoteEvent;
