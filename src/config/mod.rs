//! Configuration module for Shiori
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every field has a sensible default, so the crawler also runs
//! without a configuration file.
//!
//! # Example
//!
//! ```no_run
//! use shiori::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawling against host: {}", config.host.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, HostConfig, OutputConfig, ScopeConfig};

// Re-export parser functions
pub use parser::load_config;
