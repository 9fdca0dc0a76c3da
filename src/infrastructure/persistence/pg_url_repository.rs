//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::sync::Arc;

use crate::domain::entities::{NewUrlRecord, UrlPatch, UrlRecord};
use crate::domain::filter::{Filter, FindOptions};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

const RETURNING_COLUMNS: &str = " RETURNING id, long_url, short_url";

/// PostgreSQL repository over the `urls` table.
///
/// Filters compile to `column = ANY($n)` clauses with bound parameters.
/// "One" operations target the matching row with the lowest id, which is the
/// same row [`UrlRepository::find`] returns first.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn push_where(builder: &mut QueryBuilder<'_, Postgres>, filter: &Filter) {
    for (i, clause) in filter.clauses().iter().enumerate() {
        builder.push(if i == 0 { " WHERE " } else { " AND " });
        builder.push(clause.field.column());
        builder.push(" = ANY(");
        builder.push_bind(clause.values.clone());
        builder.push(")");
    }
}

/// `SELECT id FROM urls <filter> ORDER BY id LIMIT 1`, as a subquery.
fn push_first_id(builder: &mut QueryBuilder<'_, Postgres>, filter: &Filter) {
    builder.push("(SELECT id FROM urls");
    push_where(builder, filter);
    builder.push(" ORDER BY id LIMIT 1)");
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn find(
        &self,
        filter: &Filter,
        options: FindOptions,
    ) -> Result<Vec<UrlRecord>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT id, long_url, short_url FROM urls");
        push_where(&mut builder, filter);
        builder.push(" ORDER BY id");

        if let Some(limit) = options.limit {
            builder.push(" LIMIT ").push_bind(to_i64(limit));
        }
        if let Some(skip) = options.skip {
            builder.push(" OFFSET ").push_bind(to_i64(skip));
        }

        let records = builder
            .build_query_as::<UrlRecord>()
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(records)
    }

    async fn insert_one(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let record = sqlx::query_as::<_, UrlRecord>(
            r#"
            INSERT INTO urls (long_url, short_url)
            VALUES ($1, $2)
            RETURNING id, long_url, short_url
            "#,
        )
        .bind(new_record.long_url)
        .bind(new_record.short_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(record)
    }

    async fn update_one(
        &self,
        filter: &Filter,
        patch: UrlPatch,
    ) -> Result<Option<UrlRecord>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new("UPDATE urls SET long_url = COALESCE(");
        builder.push_bind(patch.long_url);
        builder.push(", long_url) WHERE id = ");
        push_first_id(&mut builder, filter);
        builder.push(RETURNING_COLUMNS);

        let record = builder
            .build_query_as::<UrlRecord>()
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(record)
    }

    async fn delete_one(&self, filter: &Filter) -> Result<u64, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new("DELETE FROM urls WHERE id = ");
        push_first_id(&mut builder, filter);

        let result = builder.build().execute(self.pool.as_ref()).await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
