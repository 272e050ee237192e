//! # nocturne-db
//!
//! Storage backends for the nocturne note service:
//!
//! - Connection pool management
//! - PostgreSQL implementations of the core store traits
//! - An in-memory backend for tests and embedded use
//! - Embedded schema migrations
//!
//! ## Example
//!
//! ```rust,ignore
//! use nocturne_db::Database;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/nocturne").await?;
//!     db.migrate().await?;
//!
//!     let note = db.notes.find_by_id(some_id).await?;
//!     Ok(())
//! }
//! ```

pub mod memory;
pub mod notes;
pub mod pool;
pub mod users;

// Re-export core types
pub use nocturne_core::*;

pub use memory::{MemoryNoteStore, MemoryUserStore};
pub use notes::PgNoteStore;
pub use pool::{create_pool, create_pool_with_config, log_pool_metrics, PoolConfig};
pub use users::PgUserStore;

/// Escape LIKE/ILIKE wildcard characters (`%`, `_`, `\`) in user input.
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Combined database context with all repositories.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::PgPool,
    /// Note repository.
    pub notes: PgNoteStore,
    /// User repository.
    pub users: PgUserStore,
}

impl Database {
    /// Connect with default pool configuration.
    pub async fn connect(database_url: &str) -> Result<Self> {
        Self::connect_with_config(database_url, PoolConfig::default()).await
    }

    /// Connect with a custom pool configuration.
    pub async fn connect_with_config(database_url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(database_url, config).await?;
        Ok(Self {
            notes: PgNoteStore::new(pool.clone()),
            users: PgUserStore::new(pool.clone()),
            pool,
        })
    }

    /// Run pending schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Internal(format!("migration failed: {}", e)))
    }
}
