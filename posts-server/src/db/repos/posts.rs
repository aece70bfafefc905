//! Post repository
//!
//! Handles post CRUD against the `posts` table:
//! - list: filter built as ordered predicates, count + page queries share it
//! - update: existence check and write in one transaction (row locked)
//! - delete: existence read from rows affected, no pre-check

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::{NewPost, Paginated, Pagination, Post, PostId, ValidationError};

/// Reference table definition, used by tests to provision a database.
pub const CREATE_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS posts (
    id          SERIAL PRIMARY KEY,
    title       TEXT    NOT NULL,
    image       TEXT    NOT NULL,
    category_id INTEGER NOT NULL,
    description TEXT    NOT NULL,
    content     TEXT    NOT NULL,
    status_id   INTEGER NOT NULL
)
"#;

const POST_COLUMNS: &str = "id, title, image, category_id, description, content, status_id";

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("{0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    fn post_not_found(id: PostId) -> Self {
        Self::NotFound {
            resource: "post",
            id: id.get().to_string(),
        }
    }
}

/// Filters for the post listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    /// Exact match on `category_id`
    pub category: Option<i32>,
    /// Case-insensitive substring of title, description or content
    pub keyword: Option<String>,
}

/// One WHERE predicate; binds are pushed alongside the SQL fragment.
enum Predicate<'a> {
    Category(i32),
    Keyword(&'a str),
}

impl PostFilter {
    /// Build from raw query-string values. Empty values count as absent.
    pub fn from_raw(
        category: Option<&str>,
        keyword: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let category = match category.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(raw.parse::<i32>().map_err(|_| ValidationError::InvalidParam {
                name: "Category",
                expected: "a number",
            })?),
            None => None,
        };

        let keyword = keyword.filter(|s| !s.is_empty()).map(str::to_owned);

        Ok(Self { category, keyword })
    }

    fn predicates(&self) -> Vec<Predicate<'_>> {
        let mut predicates = Vec::with_capacity(2);
        if let Some(category) = self.category {
            predicates.push(Predicate::Category(category));
        }
        if let Some(keyword) = self.keyword.as_deref() {
            predicates.push(Predicate::Keyword(keyword));
        }
        predicates
    }

    fn push_where(&self, builder: &mut QueryBuilder<'static, Postgres>) {
        let predicates = self.predicates();
        if predicates.is_empty() {
            return;
        }

        builder.push(" WHERE ");
        let mut conditions = builder.separated(" AND ");
        for predicate in predicates {
            match predicate {
                Predicate::Category(category) => {
                    conditions.push("category_id = ");
                    conditions.push_bind_unseparated(category);
                }
                Predicate::Keyword(keyword) => {
                    let pattern = like_pattern(keyword);
                    conditions.push("(title ILIKE ");
                    conditions.push_bind_unseparated(pattern.clone());
                    conditions.push_unseparated(" OR description ILIKE ");
                    conditions.push_bind_unseparated(pattern.clone());
                    conditions.push_unseparated(" OR content ILIKE ");
                    conditions.push_bind_unseparated(pattern);
                    conditions.push_unseparated(")");
                }
            }
        }
    }

    /// `SELECT COUNT(*)` over the filtered rows.
    pub fn count_query(&self) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM posts");
        self.push_where(&mut builder);
        builder
    }

    /// One page of filtered rows, newest id first.
    pub fn page_query(&self, page: Pagination) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new(format!("SELECT {POST_COLUMNS} FROM posts"));
        self.push_where(&mut builder);
        builder.push(" ORDER BY id DESC LIMIT ");
        builder.push_bind(i64::from(page.limit));
        builder.push(" OFFSET ");
        builder.push_bind(page.offset());
        builder
    }
}

/// Wrap a keyword for ILIKE, matching `%`, `_` and `\` literally.
fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for ch in keyword.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Post repository
pub struct PostRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PostRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List posts matching `filter`, one page at a time.
    ///
    /// Runs a count query and a page query with the same predicates.
    pub async fn list(
        &self,
        filter: &PostFilter,
        page: Pagination,
    ) -> Result<Paginated<Post>, DbError> {
        let total: i64 = filter
            .count_query()
            .build_query_scalar()
            .fetch_one(self.pool)
            .await?;

        let items: Vec<Post> = filter
            .page_query(page)
            .build_query_as()
            .fetch_all(self.pool)
            .await?;

        Ok(Paginated {
            items,
            total,
            page: page.page,
            limit: page.limit,
        })
    }

    /// Get a single post by ID.
    pub async fn get(&self, id: PostId) -> Result<Post, DbError> {
        let post: Post = sqlx::query_as(
            r#"
            SELECT id, title, image, category_id, description, content, status_id
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::post_not_found(id))?;

        Ok(post)
    }

    /// Insert a post, returning the id the store assigned.
    pub async fn create(&self, post: &NewPost) -> Result<i32, DbError> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO posts (title, image, category_id, description, content, status_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&post.title)
        .bind(&post.image)
        .bind(post.category_id)
        .bind(&post.description)
        .bind(&post.content)
        .bind(post.status_id)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Overwrite every field of an existing post.
    ///
    /// The existence check locks the row, so a concurrent delete either
    /// completes before it (not found) or waits until the update commits.
    pub async fn update(&self, id: PostId, post: &NewPost) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<(i32,)> =
            sqlx::query_as("SELECT id FROM posts WHERE id = $1 FOR UPDATE")
                .bind(id.get())
                .fetch_optional(&mut *tx)
                .await?;

        if existing.is_none() {
            return Err(DbError::post_not_found(id));
        }

        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = $1, image = $2, category_id = $3,
                description = $4, content = $5, status_id = $6
            WHERE id = $7
            "#,
        )
        .bind(&post.title)
        .bind(&post.image)
        .bind(post.category_id)
        .bind(&post.description)
        .bind(&post.content)
        .bind(post.status_id)
        .bind(id.get())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::post_not_found(id));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Delete a post by ID.
    pub async fn delete(&self, id: PostId) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.get())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::post_not_found(id));
        }

        Ok(())
    }
}
