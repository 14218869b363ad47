use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use super::{check_columns, ContentStore, StoreResult};
use crate::record::{RecordId, Row, Table};

/// PostgreSQL-backed store.
///
/// Rows enter through `jsonb_populate_record` and leave through `to_jsonb`,
/// so one set of queries serves every content table. Column lists are built
/// only from keys that passed [`check_columns`]; table names are compile-time
/// constants.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn column_list(row: &Row) -> String {
    row.keys()
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

#[async_trait]
impl ContentStore for PgStore {
    async fn insert(&self, table: &Table, row: Row) -> StoreResult<Value> {
        check_columns(table, &row)?;
        let name = table.name;
        let sql = if row.is_empty() {
            format!("INSERT INTO {name} DEFAULT VALUES RETURNING to_jsonb({name}.*)")
        } else {
            let columns = column_list(&row);
            format!(
                "INSERT INTO {name} ({columns}) \
                 SELECT {columns} FROM jsonb_populate_record(NULL::{name}, $1) \
                 RETURNING to_jsonb({name}.*)"
            )
        };
        let stored = sqlx::query_scalar::<_, Value>(&sql)
            .bind(Value::Object(row))
            .fetch_one(&self.pool)
            .await?;
        tracing::debug!(table = name, "row inserted");
        Ok(stored)
    }

    async fn update(&self, table: &Table, id: RecordId, patch: Row) -> StoreResult<Option<Value>> {
        check_columns(table, &patch)?;
        if patch.is_empty() {
            return self.fetch(table, id).await;
        }
        let name = table.name;
        let assignments = patch
            .keys()
            .map(|c| format!("\"{c}\" = patch.\"{c}\""))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {name} SET {assignments}, updated_at = now() \
             FROM jsonb_populate_record(NULL::{name}, $2) AS patch \
             WHERE {name}.id = $1 \
             RETURNING to_jsonb({name}.*)"
        );
        let updated = sqlx::query_scalar::<_, Value>(&sql)
            .bind(id.as_uuid())
            .bind(Value::Object(patch))
            .fetch_optional(&self.pool)
            .await?;
        Ok(updated)
    }

    async fn fetch(&self, table: &Table, id: RecordId) -> StoreResult<Option<Value>> {
        let name = table.name;
        let sql = format!("SELECT to_jsonb(t.*) FROM {name} AS t WHERE t.id = $1");
        let row = sqlx::query_scalar::<_, Value>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn fetch_all(&self, table: &Table) -> StoreResult<Vec<Value>> {
        let name = table.name;
        let sql = format!("SELECT to_jsonb(t.*) FROM {name} AS t ORDER BY t.created_at, t.id");
        let rows = sqlx::query_scalar::<_, Value>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn count(&self, table: &Table) -> StoreResult<usize> {
        let name = table.name;
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {name}"))
            .fetch_one(&self.pool)
            .await?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
