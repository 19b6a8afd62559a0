use serde::Deserialize;

/// Main configuration structure for Shiori
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub host: HostConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub scope: ScopeConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Documentation host configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HostConfig {
    /// Base URL documentation paths are resolved against
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Fixed delay before every request, in milliseconds (politeness throttle)
    #[serde(rename = "request-delay-ms", default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Per-request timeout, in seconds
    #[serde(
        rename = "request-timeout-secs",
        default = "default_request_timeout_secs"
    )]
    pub request_timeout_secs: u64,

    /// User agent string sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// Link scope configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScopeConfig {
    /// URL substrings marking non-canonical duplicates of canonical pages
    /// (redirect aliases and explicit index markers). Site-specific, so
    /// configurable rather than hard-coded.
    #[serde(rename = "skip-url-markers", default = "default_skip_url_markers")]
    pub skip_url_markers: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory where aggregated documents are stored
    #[serde(rename = "downloads-dir", default = "default_downloads_dir")]
    pub downloads_dir: String,
}

fn default_base_url() -> String {
    "https://docs.rs".to_string()
}

fn default_request_delay_ms() -> u64 {
    100
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("shiori/{}", env!("CARGO_PKG_VERSION"))
}

fn default_skip_url_markers() -> Vec<String> {
    vec!["target-redirect".to_string(), "index.html".to_string()]
}

fn default_downloads_dir() -> String {
    "./downloads".to_string()
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            request_delay_ms: default_request_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            skip_url_markers: default_skip_url_markers(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            downloads_dir: default_downloads_dir(),
        }
    }
}
