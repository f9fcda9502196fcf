//! Loading and saving the store file.
//!
//! `Store::load` never fails: a missing store is created empty, and a
//! store that does not decode is renamed to `<path>.bak` and replaced
//! by an empty one. If the file cannot be read, or cannot be moved aside,
//! it is left alone and `LoadOutcome::blocks_save` reports that the empty
//! document must not be saved. `Store::save` rewrites the whole file in one go.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::codec::{decode_bytes, encode};
use crate::error::TasklineError;
use crate::lock::StoreLock;
use crate::task::Document;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    /// No store existed; an empty one was written.
    Created,
    /// The store was unreadable as a document and was moved aside.
    Recovered { backup: PathBuf, reason: String },
    /// The store decoded but had no `lists`; it is added on next save.
    ListsInjected,
    /// The store exists but could not be read; nothing was written.
    Unreadable { reason: String },
    /// The store is corrupt and could not be moved aside; nothing was written.
    BackupFailed { backup: PathBuf, reason: String },
}

impl LoadOutcome {
    /// The loaded document stands in for data still on disk, so saving it
    /// would destroy that data.
    pub fn blocks_save(&self) -> bool {
        matches!(
            self,
            LoadOutcome::Unreadable { .. } | LoadOutcome::BackupFailed { .. }
        )
    }
}

#[derive(Debug, Clone)]
pub struct Loaded {
    pub document: Document,
    pub outcome: LoadOutcome,
}

#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

pub fn backup_path(store_path: &Path) -> PathBuf {
    let mut name = store_path.as_os_str().to_os_string();
    name.push(".bak");
    PathBuf::from(name)
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path(&self) -> PathBuf {
        backup_path(&self.path)
    }

    pub fn lock(&self) -> io::Result<StoreLock> {
        StoreLock::acquire(&self.path)
    }

    pub fn load(&self) -> Loaded {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no store, creating");
                return Loaded {
                    document: self.recreate(),
                    outcome: LoadOutcome::Created,
                };
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "store unreadable");
                return Loaded {
                    document: Document::new(),
                    outcome: LoadOutcome::Unreadable {
                        reason: err.to_string(),
                    },
                };
            }
        };

        match decode_bytes(&bytes) {
            Ok(decoded) => {
                debug!(
                    path = %self.path.display(),
                    lists = decoded.document.lists.len(),
                    "store loaded"
                );
                let outcome = if decoded.lists_injected {
                    LoadOutcome::ListsInjected
                } else {
                    LoadOutcome::Loaded
                };
                Loaded {
                    document: decoded.document,
                    outcome,
                }
            }
            Err(err) => {
                let corrupt = TasklineError::StorageCorrupt {
                    path: self.path.clone(),
                    reason: err.to_string(),
                };
                let backup = self.backup_path();
                warn!(backup = %backup.display(), "{corrupt}; moving it aside");
                if let Err(rename_err) = fs::rename(&self.path, &backup) {
                    warn!(error = %rename_err, "failed to back up corrupt store; leaving it in place");
                    return Loaded {
                        document: Document::new(),
                        outcome: LoadOutcome::BackupFailed {
                            backup,
                            reason: rename_err.to_string(),
                        },
                    };
                }
                Loaded {
                    document: self.recreate(),
                    outcome: LoadOutcome::Recovered {
                        backup,
                        reason: err.to_string(),
                    },
                }
            }
        }
    }

    pub fn save(&self, document: &Document) -> Result<(), TasklineError> {
        let write_failed = |reason: String| TasklineError::StorageWriteFailed {
            path: self.path.clone(),
            reason,
        };
        let text = encode(document).map_err(|err| write_failed(err.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| write_failed(err.to_string()))?;
        }
        fs::write(&self.path, text).map_err(|err| write_failed(err.to_string()))?;
        debug!(path = %self.path.display(), lists = document.lists.len(), "store saved");
        Ok(())
    }

    fn recreate(&self) -> Document {
        let document = Document::new();
        if let Err(err) = self.save(&document) {
            warn!("{err}");
        }
        document
    }
}
