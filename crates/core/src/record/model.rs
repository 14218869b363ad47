use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::RecordId;

/// Lifecycle columns shared by every manageable content row.
///
/// Flattened into each entity struct so the JSON row and the typed record
/// carry the same field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMeta {
    pub id: RecordId,
    pub is_visible: bool,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecordMeta {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Not soft-deleted and visible. Entities with extra conditions (date
    /// windows) layer them on top of this.
    pub fn is_active_and_visible(&self) -> bool {
        !self.is_deleted() && self.is_visible
    }
}

/// Which slice of a table an admin list shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminView {
    /// Not soft-deleted; hidden rows included.
    #[default]
    Active,
    /// Soft-deleted rows only (recovery view).
    Deleted,
    /// Everything.
    All,
}

impl AdminView {
    pub fn includes(&self, meta: &RecordMeta) -> bool {
        match self {
            AdminView::Active => !meta.is_deleted(),
            AdminView::Deleted => meta.is_deleted(),
            AdminView::All => true,
        }
    }
}

/// A store table together with the columns clients may write.
///
/// Store implementations reject any other key, so column names coming from
/// serialized patches never reach SQL unchecked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

/// Columns every lifecycle table has in addition to its own.
pub const LIFECYCLE_COLUMNS: &[&str] = &["is_visible", "deleted_at"];

impl Table {
    pub fn allows(&self, column: &str) -> bool {
        self.columns.contains(&column) || LIFECYCLE_COLUMNS.contains(&column)
    }
}
