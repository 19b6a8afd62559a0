//! Structured content extraction
//!
//! This module turns one fetched documentation page into an ordered
//! sequence of content blocks by applying a fixed, ordered list of
//! extraction rules. Each rule anchors on the markup conventions of the
//! documentation host and is independently optional: a missing element
//! yields no block, never an error. Rule order determines the
//! human-readable order of the final document and is therefore fixed.

mod block;
mod rules;

pub use block::{ExtractedBlock, PageContent};
pub use rules::extract_page;
