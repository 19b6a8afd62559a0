//! Crawl coordinator - main crawl orchestration logic
//!
//! The coordinator owns the only mutable state of a crawl (the visited
//! set, the FIFO frontier, and the accumulated page content) and drives
//! fetch, extraction, and link discovery in a breadth-first loop until the
//! frontier is empty. The crawl is strictly sequential: one fetch in
//! flight, one URL per iteration. Page-scoped failures are absorbed here
//! and surfaced only as progress events; only a failure on the seed URL
//! itself is fatal.

use crate::config::Config;
use crate::crawler::discoverer::discover_links;
use crate::crawler::fetcher::{build_http_client, fetch_page, Page};
use crate::extract::{extract_page, PageContent};
use crate::output::Document;
use crate::progress::ProgressSink;
use crate::url::CrawlScope;
use crate::ShioriError;
use reqwest::Client;
use std::collections::{HashSet, VecDeque};
use std::time::Duration;
use url::Url;

/// Per-crawl mutable state, owned exclusively by the coordinator and
/// discarded when the crawl ends
struct CrawlState {
    /// Normalized URLs already fetched; membership is the de-duplication key
    visited: HashSet<String>,
    /// URLs pending fetch, FIFO so the traversal is breadth-first
    frontier: VecDeque<Url>,
    /// Extracted page content, append-only, in visit order
    pages: Vec<PageContent>,
}

impl CrawlState {
    fn new() -> Self {
        Self {
            visited: HashSet::new(),
            frontier: VecDeque::new(),
            pages: Vec::new(),
        }
    }

    fn mark_visited(&mut self, url: &Url) {
        self.visited.insert(url.as_str().to_string());
    }

    fn in_frontier(&self, url: &Url) -> bool {
        self.frontier.iter().any(|u| u.as_str() == url.as_str())
    }
}

/// Main crawler coordinator structure
pub struct Coordinator {
    client: Client,
    scope: CrawlScope,
    delay: Duration,
    progress: ProgressSink,
}

impl Coordinator {
    /// Creates a coordinator for one crawl rooted at `seed`
    pub fn new(config: &Config, seed: &Url, progress: ProgressSink) -> Result<Self, ShioriError> {
        let client = build_http_client(
            &config.crawler.user_agent,
            config.crawler.request_timeout_secs,
        )?;

        let scope = CrawlScope::new(seed, config.scope.skip_url_markers.clone());

        Ok(Self {
            client,
            scope,
            delay: Duration::from_millis(config.crawler.request_delay_ms),
            progress,
        })
    }

    /// Runs the breadth-first crawl to completion
    ///
    /// Terminates when the frontier empties; individual page failures do
    /// not abort the crawl. Returns the aggregated document, which may be
    /// empty if no page yielded content (the writer rejects that case).
    ///
    /// # Errors
    ///
    /// * `ShioriError::SeedUnreachable` - the seed URL itself could not be
    ///   fetched; nothing was crawled
    pub async fn run(&self, seed: Url) -> Result<Document, ShioriError> {
        self.progress.status("Starting documentation scraping...");
        tracing::info!(seed = %seed, prefix = self.scope.prefix(), "starting crawl");

        let mut state = CrawlState::new();

        // The seed is the one URL whose failure is fatal
        let seed_page = match fetch_page(&self.client, &seed, self.delay).await {
            Ok(page) => page,
            Err(e) => {
                self.progress.error("Failed to fetch main page");
                return Err(ShioriError::SeedUnreachable {
                    url: seed.to_string(),
                    reason: e.to_string(),
                });
            }
        };

        state.mark_visited(&seed);
        self.process_page(&seed_page, &mut state);

        let mut total = state.frontier.len() + 1;
        let mut processed = 1usize;
        self.progress.status(format!(
            "Found {} documentation pages to process",
            state.frontier.len()
        ));

        while let Some(url) = state.frontier.pop_front() {
            processed += 1;
            self.progress
                .status(format!("Processing page {}/{}: {}", processed, total, url));

            match fetch_page(&self.client, &url, self.delay).await {
                Ok(page) => {
                    state.mark_visited(&url);
                    let before = state.frontier.len();
                    self.process_page(&page, &mut state);
                    let added = state.frontier.len() - before;
                    if added > 0 {
                        total = processed + state.frontier.len();
                        self.progress
                            .status(format!("Found {} new pages, total: {}", added, total));
                    }
                }
                Err(e) => {
                    // Page-scoped failure: report, mark visited so the URL
                    // is permanently skipped for this run, keep draining.
                    state.mark_visited(&url);
                    tracing::warn!(url = %url, error = %e, "page fetch failed, skipping");
                    self.progress.error(format!("Error fetching {}: {}", url, e));
                }
            }
        }

        self.progress
            .status(format!("Completed processing {} pages", processed));
        tracing::info!(
            pages_visited = state.visited.len(),
            pages_with_content = state.pages.len(),
            "crawl complete"
        );

        Ok(Document::new(state.pages))
    }

    /// Extracts content from a fetched page and enqueues its fresh links
    fn process_page(&self, page: &Page, state: &mut CrawlState) {
        if let Some(content) = extract_page(&page.url, &page.html, &self.progress) {
            self.progress
                .status(format!("Adding content from {}", page.url));
            state.pages.push(content);
        }

        for link in discover_links(page, &self.scope, &state.visited) {
            if state.in_frontier(&link) {
                continue;
            }
            state.frontier.push_back(link);
        }
    }
}
