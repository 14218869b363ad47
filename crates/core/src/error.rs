use thiserror::Error;

use crate::record::ValidationError;
use crate::store::StoreError;

/// Errors from content operations.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    /// A multi-row reorder stopped part way. The first `applied` writes are
    /// persisted; the rest were never issued.
    #[error("reorder stopped after {applied} of {total} writes: {source}")]
    ReorderIncomplete {
        applied: usize,
        total: usize,
        #[source]
        source: StoreError,
    },
}

impl ContentError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        ContentError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

pub type ContentResult<T> = Result<T, ContentError>;
