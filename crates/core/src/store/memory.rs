use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use tokio::sync::RwLock;

use super::{check_columns, ContentStore, StoreError, StoreResult};
use crate::record::{RecordId, Row, Table};

const NEVER: usize = usize::MAX;

/// In-process store with the same contract as [`super::PgStore`].
///
/// Used by tests and for running the site without a database. Update
/// failures can be scheduled with [`MemoryStore::fail_updates_after`] to
/// exercise callers that issue several writes in a row.
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<Tables>,
    updates_until_failure: AtomicUsize,
}

#[derive(Debug, Default)]
struct Tables {
    rows: HashMap<&'static str, Vec<Row>>,
    last_stamp: Option<DateTime<Utc>>,
}

impl Tables {
    /// Strictly increasing, so insertion order survives a sort by
    /// `created_at` even on coarse clocks.
    fn stamp(&mut self) -> Value {
        let mut now = Utc::now();
        if let Some(last) = self.last_stamp {
            if now <= last {
                now = last + Duration::microseconds(1);
            }
        }
        self.last_stamp = Some(now);
        Value::String(now.to_rfc3339())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Tables::default()),
            updates_until_failure: AtomicUsize::new(NEVER),
        }
    }

    /// Let the next `successes` updates through, then fail every update
    /// until [`MemoryStore::heal`] is called.
    pub fn fail_updates_after(&self, successes: usize) {
        self.updates_until_failure.store(successes, Ordering::SeqCst);
    }

    pub fn heal(&self) {
        self.updates_until_failure.store(NEVER, Ordering::SeqCst);
    }

    fn check_failure(&self) -> StoreResult<()> {
        let remaining = self.updates_until_failure.load(Ordering::SeqCst);
        if remaining == NEVER {
            return Ok(());
        }
        if remaining == 0 {
            return Err(StoreError::Unavailable("injected update failure".into()));
        }
        self.updates_until_failure
            .store(remaining - 1, Ordering::SeqCst);
        Ok(())
    }
}

fn id_matches(row: &Row, id: RecordId) -> bool {
    row.get("id").and_then(Value::as_str) == Some(id.to_string().as_str())
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn insert(&self, table: &Table, mut row: Row) -> StoreResult<Value> {
        check_columns(table, &row)?;
        let mut tables = self.inner.write().await;
        let now = tables.stamp();
        row.insert("id".into(), Value::String(RecordId::new().to_string()));
        row.insert("created_at".into(), now.clone());
        row.insert("updated_at".into(), now);
        tables.rows.entry(table.name).or_default().push(row.clone());
        Ok(Value::Object(row))
    }

    async fn update(&self, table: &Table, id: RecordId, patch: Row) -> StoreResult<Option<Value>> {
        check_columns(table, &patch)?;
        self.check_failure()?;

        let mut tables = self.inner.write().await;
        let now = tables.stamp();
        let Some(row) = tables
            .rows
            .get_mut(table.name)
            .and_then(|rows| rows.iter_mut().find(|row| id_matches(row, id)))
        else {
            return Ok(None);
        };
        row.extend(patch);
        row.insert("updated_at".into(), now);
        Ok(Some(Value::Object(row.clone())))
    }

    async fn fetch(&self, table: &Table, id: RecordId) -> StoreResult<Option<Value>> {
        let tables = self.inner.read().await;
        Ok(tables
            .rows
            .get(table.name)
            .and_then(|rows| rows.iter().find(|row| id_matches(row, id)))
            .map(|row| Value::Object(row.clone())))
    }

    async fn fetch_all(&self, table: &Table) -> StoreResult<Vec<Value>> {
        let tables = self.inner.read().await;
        Ok(tables
            .rows
            .get(table.name)
            .map(|rows| rows.iter().cloned().map(Value::Object).collect())
            .unwrap_or_default())
    }

    async fn count(&self, table: &Table) -> StoreResult<usize> {
        let tables = self.inner.read().await;
        Ok(tables.rows.get(table.name).map_or(0, Vec::len))
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
