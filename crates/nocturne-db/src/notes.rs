//! PostgreSQL note store.
//!
//! Translates the core [`FilterSpec`] into SQL. The translation must agree
//! with the in-process reference evaluation in `nocturne_core::query`; the
//! unit tests here pin the clause generation, and the API integration
//! suite exercises the shared contract through the in-memory backend.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use nocturne_core::{
    Author, Error, FilterSpec, ListQuery, Note, NoteStore, Result, SortKey, SortOrder, TagCount,
};

use crate::escape_like;

/// Cap on the tag-frequency aggregation.
const TAG_AGGREGATION_LIMIT: i64 = 100;

const SELECT_NOTE: &str = "SELECT n.id, n.title, n.content, n.tags, n.is_public, \
     n.likes, n.views, n.is_active, n.created_at, n.updated_at, \
     u.id AS author_id, u.name AS author_name, u.email AS author_email \
     FROM note n JOIN app_user u ON u.id = n.author_id ";

/// PostgreSQL implementation of [`NoteStore`].
#[derive(Clone)]
pub struct PgNoteStore {
    pool: PgPool,
}

impl PgNoteStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// =============================================================================
// QUERY BUILDING
// =============================================================================

/// Append the WHERE clause for a filter, numbering bind parameters from
/// `*param_idx`. Soft-deleted rows are always excluded.
fn build_where_clause(filter: &FilterSpec, param_idx: &mut usize, sql: &mut String) {
    sql.push_str("WHERE n.is_active = true ");
    if filter.is_public.is_some() {
        sql.push_str(&format!("AND n.is_public = ${} ", param_idx));
        *param_idx += 1;
    }
    if filter.author.is_some() {
        sql.push_str(&format!("AND n.author_id = ${} ", param_idx));
        *param_idx += 1;
    }
    if !filter.tags.is_empty() {
        // array overlap: at least one tag in common (OR semantics)
        sql.push_str(&format!("AND n.tags && ${} ", param_idx));
        *param_idx += 1;
    }
    if filter.search.is_some() {
        sql.push_str(&format!(
            "AND (n.title ILIKE ${i} OR n.content ILIKE ${i} OR u.name ILIKE ${i}) ",
            i = param_idx
        ));
        *param_idx += 1;
    }
}

/// ORDER BY expression for a sort key/direction.
///
/// `n.id` (UUIDv7, time-ordered) breaks ties so pagination windows never
/// overlap between requests.
fn build_order_clause(sort_by: SortKey, sort_order: SortOrder) -> String {
    let direction = match sort_order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };
    let column = match sort_by {
        SortKey::CreatedAt => "n.created_at",
        SortKey::UpdatedAt => "n.updated_at",
        SortKey::Title => "LOWER(n.title)",
        SortKey::Views => "n.views",
    };
    format!("{} {}, n.id ASC", column, direction)
}

/// ILIKE pattern for a search query, wildcards escaped.
fn search_pattern(filter: &FilterSpec) -> Option<String> {
    filter
        .search
        .as_ref()
        .map(|q| format!("%{}%", escape_like(q)))
}

/// Bind filter parameters in the order `build_where_clause` numbered them.
macro_rules! bind_filter_params {
    ($query:expr, $filter:expr, $pattern:expr) => {{
        let mut q = $query;
        if let Some(is_public) = $filter.is_public {
            q = q.bind(is_public);
        }
        if let Some(author) = $filter.author {
            q = q.bind(author);
        }
        if !$filter.tags.is_empty() {
            q = q.bind($filter.tags.clone());
        }
        if let Some(pattern) = $pattern {
            q = q.bind(pattern);
        }
        q
    }};
}

fn map_row_to_note(row: PgRow) -> Note {
    Note {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        tags: row.get("tags"),
        is_public: row.get("is_public"),
        author: Author {
            id: row.get("author_id"),
            name: row.get("author_name"),
            email: row.get("author_email"),
        },
        likes: row.get("likes"),
        views: row.get("views"),
        is_active: row.get("is_active"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl NoteStore for PgNoteStore {
    async fn find(&self, query: &ListQuery) -> Result<Vec<Note>> {
        let mut sql = String::from(SELECT_NOTE);
        let mut param_idx = 1;
        build_where_clause(&query.filter, &mut param_idx, &mut sql);
        sql.push_str(&format!(
            "ORDER BY {} LIMIT ${} OFFSET ${}",
            build_order_clause(query.sort_by, query.sort_order),
            param_idx,
            param_idx + 1
        ));

        let pattern = search_pattern(&query.filter);
        let q = bind_filter_params!(sqlx::query(&sql), query.filter, pattern)
            .bind(query.page.limit as i64)
            .bind(query.page.offset() as i64);

        let rows = q.fetch_all(&self.pool).await.map_err(Error::Database)?;
        Ok(rows.into_iter().map(map_row_to_note).collect())
    }

    async fn count_matching(&self, filter: &FilterSpec) -> Result<i64> {
        let mut sql =
            String::from("SELECT COUNT(*) FROM note n JOIN app_user u ON u.id = n.author_id ");
        let mut param_idx = 1;
        build_where_clause(filter, &mut param_idx, &mut sql);

        let pattern = search_pattern(filter);
        let row = bind_filter_params!(sqlx::query(&sql), filter, pattern)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(row.get::<i64, _>(0))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Note>> {
        let sql = format!("{}WHERE n.id = $1", SELECT_NOTE);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(row.map(map_row_to_note))
    }

    async fn save(&self, note: &Note) -> Result<Note> {
        // author_id is intentionally absent from the conflict branch:
        // ownership never changes after creation
        sqlx::query(
            "INSERT INTO note (id, title, content, tags, is_public, author_id, \
                 likes, views, is_active, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             ON CONFLICT (id) DO UPDATE SET \
                 title = EXCLUDED.title, \
                 content = EXCLUDED.content, \
                 tags = EXCLUDED.tags, \
                 is_public = EXCLUDED.is_public, \
                 likes = EXCLUDED.likes, \
                 views = EXCLUDED.views, \
                 is_active = EXCLUDED.is_active, \
                 updated_at = EXCLUDED.updated_at",
        )
        .bind(note.id)
        .bind(&note.title)
        .bind(&note.content)
        .bind(&note.tags)
        .bind(note.is_public)
        .bind(note.author.id)
        .bind(&note.likes)
        .bind(note.views)
        .bind(note.is_active)
        .bind(note.created_at)
        .bind(note.updated_at)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        self.find_by_id(note.id)
            .await?
            .ok_or_else(|| Error::Internal(format!("note {} vanished after save", note.id)))
    }

    async fn record_view(&self, id: Uuid) -> Result<Option<Note>> {
        let result = sqlx::query(
            "UPDATE note SET views = views + 1 WHERE id = $1 AND is_active = true",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn toggle_like(&self, id: Uuid, user_id: Uuid) -> Result<Option<Note>> {
        let result = sqlx::query(
            "UPDATE note SET likes = CASE \
                 WHEN $2 = ANY(likes) THEN array_remove(likes, $2) \
                 ELSE array_append(likes, $2) \
             END \
             WHERE id = $1 AND is_active = true",
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn aggregate_tag_counts(&self) -> Result<Vec<TagCount>> {
        let rows = sqlx::query(
            "SELECT t.tag AS name, COUNT(*) AS count \
             FROM note n, unnest(n.tags) AS t(tag) \
             WHERE n.is_active = true \
             GROUP BY t.tag \
             ORDER BY count DESC, t.tag ASC \
             LIMIT $1",
        )
        .bind(TAG_AGGREGATION_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows
            .into_iter()
            .map(|row| TagCount {
                name: row.get("name"),
                count: row.get("count"),
            })
            .collect())
    }

    async fn total_views(&self, author_id: Uuid) -> Result<i64> {
        let row = sqlx::query(
            "SELECT COALESCE(SUM(views), 0)::bigint FROM note \
             WHERE author_id = $1 AND is_active = true",
        )
        .bind(author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(row.get::<i64, _>(0))
    }

    async fn total_likes(&self, author_id: Uuid) -> Result<i64> {
        let row = sqlx::query(
            "SELECT COALESCE(SUM(cardinality(likes)), 0)::bigint FROM note \
             WHERE author_id = $1 AND is_active = true",
        )
        .bind(author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(row.get::<i64, _>(0))
    }

    async fn most_viewed(&self, author_id: Uuid) -> Result<Option<Note>> {
        let sql = format!(
            "{}WHERE n.author_id = $1 AND n.is_active = true \
             ORDER BY n.views DESC, n.id ASC LIMIT 1",
            SELECT_NOTE
        );
        let row = sqlx::query(&sql)
            .bind(author_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(row.map(map_row_to_note))
    }
}
