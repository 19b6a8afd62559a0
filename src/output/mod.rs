//! Output module: document aggregation and persistence
//!
//! The document is the ordered concatenation of every page's extracted
//! blocks, framed per page, created once after a successful crawl. The
//! store persists documents under generated collision-free filenames and
//! serves them back by exact name.

mod document;
mod store;

pub use document::Document;
pub use store::{DocumentStore, StoreError};
