use crate::output::Document;
use chrono::{DateTime, Local};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Persistence errors for the document store
#[derive(Debug, Error)]
pub enum StoreError {
    /// The crawl extracted nothing; an empty file is never written
    #[error("no content was extracted")]
    EmptyDocument,

    /// No document exists under the requested name
    #[error("document '{0}' not found")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Filesystem store for aggregated documents
///
/// The store directory is the only resource shared between concurrent
/// sessions; the generated per-session filename keeps writers from
/// clobbering each other.
pub struct DocumentStore {
    dir: PathBuf,
}

impl DocumentStore {
    /// Opens (creating if necessary) a store rooted at `dir`
    pub fn new(dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Generates the collision-resistant filename for one saved document
    ///
    /// `{base}_{YYYYmmdd_HHMMSS}_{suffix}.md`, where the suffix is the
    /// first 8 hex characters of the SHA-256 of the session id. A `.md`
    /// extension on the base name is not doubled.
    pub fn generate_filename(
        base_name: &str,
        session_id: &str,
        now: DateTime<Local>,
    ) -> String {
        let base = base_name.trim().trim_end_matches(".md");
        let timestamp = now.format("%Y%m%d_%H%M%S");

        let mut hasher = Sha256::new();
        hasher.update(session_id.as_bytes());
        let digest = hex::encode(hasher.finalize());

        format!("{}_{}_{}.md", base, timestamp, &digest[..8])
    }

    /// Persists a document, returning the generated filename
    ///
    /// # Errors
    ///
    /// * `StoreError::EmptyDocument` - the document has zero blocks
    /// * `StoreError::Io` - the write itself failed
    pub fn save(
        &self,
        document: &Document,
        base_name: &str,
        session_id: &str,
    ) -> Result<String, StoreError> {
        if document.is_empty() {
            return Err(StoreError::EmptyDocument);
        }

        let filename = Self::generate_filename(base_name, session_id, Local::now());
        std::fs::write(self.dir.join(&filename), document.render())?;
        Ok(filename)
    }

    /// Reads a stored document back as bytes, by exact filename
    ///
    /// Names carrying path separators or parent references never resolve;
    /// they are reported as not found rather than escaping the store.
    pub fn open(&self, filename: &str) -> Result<Vec<u8>, StoreError> {
        if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
            return Err(StoreError::NotFound(filename.to_string()));
        }

        match std::fs::read(self.dir.join(filename)) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(filename.to_string()))
            }
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}
