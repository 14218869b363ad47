//! Content backend for the bilingual marketing site: typed records, the
//! visibility / soft-delete / ordering lifecycle, and the stores behind it.

pub mod auth;
pub mod bilingual;
pub mod company;
pub mod entity;
pub mod error;
pub mod lifecycle;
pub mod public;
pub mod record;
pub mod reorder;
pub mod store;

pub use error::{ContentError, ContentResult};
pub use lifecycle::Lifecycle;
