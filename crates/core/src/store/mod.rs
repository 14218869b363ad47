pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::record::{RecordId, Row, Table};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("column {column} is not writable on {table}")]
    UnknownColumn { table: &'static str, column: String },

    #[error("failed to encode row for {table}: {source}")]
    Encode {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed row from {table}: {source}")]
    Decode {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Request/response access to the hosted content tables.
///
/// Rows travel as JSON objects keyed by column name. The store owns `id`,
/// `created_at` and `updated_at`; callers never write them. Nothing here is
/// transactional across calls.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Insert a row and return it as stored.
    async fn insert(&self, table: &Table, row: Row) -> StoreResult<Value>;

    /// Merge `patch` into the row with `id`. `Ok(None)` when no such row.
    async fn update(&self, table: &Table, id: RecordId, patch: Row) -> StoreResult<Option<Value>>;

    async fn fetch(&self, table: &Table, id: RecordId) -> StoreResult<Option<Value>>;

    /// Every row, in insertion order.
    async fn fetch_all(&self, table: &Table) -> StoreResult<Vec<Value>>;

    async fn count(&self, table: &Table) -> StoreResult<usize>;

    /// Connectivity check for health endpoints.
    async fn ping(&self) -> StoreResult<()>;
}

/// Reject keys that are not writable columns of `table`.
pub fn check_columns(table: &Table, row: &Row) -> StoreResult<()> {
    match row.keys().find(|column| !table.allows(column)) {
        Some(column) => Err(StoreError::UnknownColumn {
            table: table.name,
            column: column.clone(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TABLE: Table = Table {
        name: "faqs",
        columns: &["question_ja"],
    };

    #[test]
    fn audit_columns_are_not_writable() {
        let mut row = Row::new();
        row.insert("question_ja".into(), json!("Q"));
        assert!(check_columns(&TABLE, &row).is_ok());

        row.insert("created_at".into(), json!("2024-01-01T00:00:00Z"));
        assert!(matches!(
            check_columns(&TABLE, &row),
            Err(StoreError::UnknownColumn { column, .. }) if column == "created_at"
        ));
    }
}
