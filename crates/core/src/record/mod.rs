pub mod id;
pub mod model;
pub mod patch;
pub mod validate;

pub use id::RecordId;
pub use model::{AdminView, RecordMeta, Table};
pub use patch::Row;
pub use validate::ValidationError;
