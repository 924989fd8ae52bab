use crate::document::ConfigDocument;
use crate::error::{PersistenceError, PersistenceErrorExt};
use std::fmt::Debug;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

const TMP_MARKER: &str = "xcoretmp";

/// Backing storage of configuration documents.
pub trait DocumentStore: Debug + Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    /// Creates `dir` and its parents if missing. Idempotent.
    ///
    /// # Errors
    /// Returns [`PersistenceError::Io`] when the directory cannot be created.
    fn ensure_dir(&self, dir: &Path) -> Result<(), PersistenceError>;

    /// # Errors
    /// Returns [`PersistenceError::Io`] for unreadable files and
    /// [`PersistenceError::Parse`] for malformed content.
    fn load(&self, path: &Path) -> Result<ConfigDocument, PersistenceError>;

    /// # Errors
    /// Returns [`PersistenceError::Io`] when the document cannot be written.
    fn save(&self, path: &Path, document: &ConfigDocument) -> Result<(), PersistenceError>;
}

/// Local filesystem store with atomic replacement on save.
#[derive(Debug, Default)]
pub struct FileStore {
    tmp_counter: AtomicU64,
}

impl FileStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn unique_tmp_path(&self, target: &Path) -> PathBuf {
        let counter = self.tmp_counter.fetch_add(1, Ordering::Relaxed);
        let file_name = target.file_name().and_then(|s| s.to_str()).unwrap_or("document");
        target.with_file_name(format!("{file_name}.{TMP_MARKER}.{}.{counter}", std::process::id()))
    }
}

impl DocumentStore for FileStore {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn ensure_dir(&self, dir: &Path) -> Result<(), PersistenceError> {
        fs::create_dir_all(dir).context(format!("Failed to create {}", dir.display()))
    }

    fn load(&self, path: &Path) -> Result<ConfigDocument, PersistenceError> {
        let text = fs::read_to_string(path).context(format!("Failed to read {}", path.display()))?;
        let document = ConfigDocument::parse(&text)
            .context(format!("Failed to parse {}", path.display()))?;
        debug!(path = %path.display(), "Document loaded");
        Ok(document)
    }

    /// Writes a unique temporary sibling, syncs it and renames it over the target.
    /// Targets that refuse replacement are removed first.
    fn save(&self, path: &Path, document: &ConfigDocument) -> Result<(), PersistenceError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.ensure_dir(parent)?;
        }

        let temp = self.unique_tmp_path(path);
        {
            let mut file = fs::OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(&temp)
                .context(format!("Temp creation failed: {}", temp.display()))?;
            file.write_all(document.to_string().as_bytes()).context("Write failed")?;
            file.sync_all().context("Hardware sync failed")?;
        }

        if let Err(err) = fs::rename(&temp, path) {
            if err.kind() == ErrorKind::AlreadyExists {
                fs::remove_file(path)
                    .context(format!("Failed to replace existing file: {}", path.display()))?;
                fs::rename(&temp, path).context(format!(
                    "Atomic swap failed: {} -> {}",
                    temp.display(),
                    path.display()
                ))?;
            } else {
                if let Err(cleanup) = fs::remove_file(&temp) {
                    warn!(path = %temp.display(), error = %cleanup, "Temporary file cleanup failed");
                }
                return Err(PersistenceError::Io {
                    source: err,
                    context: Some(
                        format!("Atomic swap failed: {} -> {}", temp.display(), path.display())
                            .into(),
                    ),
                });
            }
        }

        debug!(path = %path.display(), "Document saved atomically");
        Ok(())
    }
}
