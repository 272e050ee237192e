//! PostgreSQL user store.

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use nocturne_core::{Error, Result, User, UserStore};

/// PostgreSQL implementation of [`UserStore`].
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let row = sqlx::query(
            "SELECT id, name, email, is_active, created_at FROM app_user \
             WHERE id = $1 AND is_active = true",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.map(|row| User {
            id: row.get("id"),
            name: row.get("name"),
            email: row.get("email"),
            is_active: row.get("is_active"),
            created_at: row.get("created_at"),
        }))
    }
}
