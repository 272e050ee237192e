//! Structured logging field name constants.
//!
//! All crates use these constants for consistent structured logging
//! fields, so log aggregation tools can query by standardized names
//! across every subsystem.

/// Correlation ID propagated through a request. Format: UUIDv7.
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "api", "engine", "db", "cache"
pub const SUBSYSTEM: &str = "subsystem";

/// Logical operation name.
/// Examples: "list", "get_one", "toggle_like", "reload"
pub const OPERATION: &str = "op";

/// Note UUID being operated on.
pub const NOTE_ID: &str = "note_id";

/// Acting user UUID.
pub const USER_ID: &str = "user_id";

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of results returned by a listing or aggregation.
pub const RESULT_COUNT: &str = "result_count";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
