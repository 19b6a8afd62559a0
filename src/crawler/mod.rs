//! Crawler module for page fetching and crawl orchestration
//!
//! This module contains the core crawling logic:
//! - HTTP fetching with a fixed politeness delay
//! - In-scope link discovery
//! - Breadth-first crawl coordination
//! - Full session orchestration (crawl, then save, then `DONE`)

mod coordinator;
mod discoverer;
mod fetcher;

pub use coordinator::Coordinator;
pub use discoverer::discover_links;
pub use fetcher::{build_http_client, fetch_page, FetchError, Page};

use crate::config::Config;
use crate::output::{DocumentStore, StoreError};
use crate::progress::ProgressSink;
use crate::url::DocPath;
use crate::ShioriError;
use std::path::Path;

/// The independently observable outcomes of one session
///
/// Scrape success and save success are distinct: a crawl can complete and
/// still fail to persist (empty result, disk error). Both outcomes are
/// also reported as progress events before `DONE`, so an external caller
/// never infers them from event count or timing.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    /// The crawl loop ran to completion (frontier emptied)
    pub scraped: bool,
    /// Filename the document was saved under, when the save succeeded
    pub saved_as: Option<String>,
}

/// Runs one complete crawl session: crawl, save, report, `DONE`
///
/// Each session owns its crawl state; concurrent sessions share nothing
/// but the store directory, where the generated filename keeps writers
/// from clobbering each other. Every exit path emits `DONE` as the final
/// event.
pub async fn run_session(
    config: &Config,
    doc_path: &DocPath,
    base_name: &str,
    session_id: &str,
    progress: &ProgressSink,
) -> SessionOutcome {
    let mut outcome = SessionOutcome {
        scraped: false,
        saved_as: None,
    };

    let result = crawl_once(config, doc_path, progress).await;

    match result {
        Ok(document) => {
            outcome.scraped = true;
            progress.status("Scraping completed successfully");

            match save_document(config, &document, base_name, session_id) {
                Ok(filename) => {
                    tracing::info!(filename = %filename, "document saved");
                    outcome.saved_as = Some(filename);
                    progress.status("Documentation saved successfully");
                }
                Err(StoreError::EmptyDocument) => {
                    progress.warning("No content to save!");
                    progress.error("Failed to save documentation");
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to save document");
                    progress.error(format!("Failed to save file - {}", e));
                }
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "crawl failed");
            progress.error(format!("Scraping failed - {}", e));
        }
    }

    progress.done();
    outcome
}

async fn crawl_once(
    config: &Config,
    doc_path: &DocPath,
    progress: &ProgressSink,
) -> Result<crate::output::Document, ShioriError> {
    let seed = doc_path.seed_url(&config.host.base_url)?;
    let coordinator = Coordinator::new(config, &seed, progress.clone())?;
    coordinator.run(seed).await
}

fn save_document(
    config: &Config,
    document: &crate::output::Document,
    base_name: &str,
    session_id: &str,
) -> Result<String, StoreError> {
    let store = DocumentStore::new(Path::new(&config.output.downloads_dir))?;
    store.save(document, base_name, session_id)
}
