//! Shiori: an offline snapshot tool for online API documentation
//!
//! This crate implements a polite breadth-first crawler that walks the pages
//! of a documentation site reachable from one seed URL, extracts structured
//! content from each page, and aggregates everything into a single readable
//! text document. Progress is observable through a one-way event stream.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod progress;
pub mod url;

use thiserror::Error;

/// Main error type for Shiori operations
#[derive(Debug, Error)]
pub enum ShioriError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid documentation path: {0}")]
    Path(#[from] PathError),

    #[error("Failed to fetch main page {url}: {reason}")]
    SeedUnreachable { url: String, reason: String },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Store error: {0}")]
    Store(#[from] output::StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors rejecting a malformed documentation path before any network activity
#[derive(Debug, Error)]
pub enum PathError {
    #[error("documentation path cannot be empty")]
    Empty,

    #[error("expected name/version/name, got '{0}'")]
    Shape(String),

    #[error("invalid path segment '{0}'")]
    Segment(String),

    #[error("invalid version '{0}' (expected 'latest' or a dotted version)")]
    Version(String),
}

/// Result type alias for Shiori operations
pub type Result<T> = std::result::Result<T, ShioriError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_session, Coordinator, SessionOutcome};
pub use extract::{ExtractedBlock, PageContent};
pub use output::{Document, DocumentStore};
pub use progress::{ProgressEvent, ProgressSink};
pub use self::url::{CrawlScope, DocPath};
