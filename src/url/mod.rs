//! URL handling module for Shiori
//!
//! This module provides documentation path validation (the crawl input) and
//! the crawl scope used to keep the traversal inside one documentation tree.

mod scope;
mod seed;

pub use scope::CrawlScope;
pub use seed::DocPath;
