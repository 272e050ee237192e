//! Shared application state.

use std::sync::Arc;

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::RateLimiter;

use nocturne_core::{NoteStore, QueryEngine, UserStore};

/// Global rate limiter type (direct quota, no per-client bucketing).
pub type GlobalRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The note query engine.
    pub engine: QueryEngine,
    /// User account lookups.
    pub users: Arc<dyn UserStore>,
    /// Global rate limiter (None disables rate limiting).
    pub rate_limiter: Option<Arc<GlobalRateLimiter>>,
}

impl AppState {
    /// Build state over any pair of storage backends.
    pub fn new(notes: Arc<dyn NoteStore>, users: Arc<dyn UserStore>) -> Self {
        Self {
            engine: QueryEngine::new(notes),
            users,
            rate_limiter: None,
        }
    }

    /// Attach a global rate limiter.
    pub fn with_rate_limiter(mut self, limiter: Arc<GlobalRateLimiter>) -> Self {
        self.rate_limiter = Some(limiter);
        self
    }
}
