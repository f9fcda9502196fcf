//! One call per CLI command: lock, load, operate, save.

use std::path::Path;

use tracing::debug;

use crate::config::TasklineConfig;
use crate::error::TasklineError;
use crate::lists::{create_list, delete_list, list_names};
use crate::lock::lock_path;
use crate::store::{LoadOutcome, Loaded, Store};
use crate::task::Document;
use crate::task_ops::{
    append, mark_done, parse_position, remove, render, render_task_line, RenderedTask,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Warn(String),
}

impl Notice {
    pub fn tag(&self) -> &'static str {
        match self {
            Notice::Info(_) => "[INFO]",
            Notice::Warn(_) => "[WARN]",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Info(message) | Notice::Warn(message) => message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Done(String),
    Tasks { list: String, tasks: Vec<RenderedTask> },
    Lists(Vec<String>),
}

impl Body {
    pub fn lines(&self) -> Vec<String> {
        match self {
            Body::Done(message) => vec![format!("[OK] {message}")],
            Body::Tasks { list, tasks } => {
                let mut lines = vec![format!("=== {list} ===")];
                lines.extend(tasks.iter().map(render_task_line));
                lines
            }
            Body::Lists(names) => {
                let mut lines = vec!["Existing lists:".to_string()];
                if names.is_empty() {
                    lines.push("  (no lists)".to_string());
                } else {
                    lines.extend(names.iter().map(|name| format!("  - {name}")));
                }
                lines
            }
        }
    }
}

#[derive(Debug)]
pub struct Reply {
    pub notices: Vec<Notice>,
    pub outcome: Result<Body, TasklineError>,
}

impl Reply {
    fn failed(err: TasklineError) -> Self {
        Self {
            notices: Vec::new(),
            outcome: Err(err),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Taskline {
    store: Store,
    locking: bool,
}

impl Taskline {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            locking: true,
        }
    }

    pub fn from_config(root: &Path, config: &TasklineConfig) -> Self {
        Self::new(Store::new(config.store_path(root))).with_locking(config.lock_enabled())
    }

    pub fn with_locking(mut self, locking: bool) -> Self {
        self.locking = locking;
        self
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn create_list(&self, name: &str) -> Reply {
        self.mutate(|doc, _| {
            create_list(doc, name)?;
            Ok(format!("List '{name}' created."))
        })
    }

    pub fn add_task(&self, list: &str, text: &str) -> Reply {
        self.mutate(|doc, notices| {
            let outcome = append(doc, list, text)?;
            if outcome.list_created {
                notices.push(Notice::Info(format!(
                    "List '{list}' did not exist; created automatically."
                )));
            }
            Ok(format!("Task added to '{list}'."))
        })
    }

    pub fn list_tasks(&self, list: &str) -> Reply {
        self.read(|doc| {
            Ok(Body::Tasks {
                list: list.to_string(),
                tasks: render(doc, list)?,
            })
        })
    }

    pub fn list_all_lists(&self) -> Reply {
        self.read(|doc| Ok(Body::Lists(list_names(doc))))
    }

    pub fn remove_task(&self, list: &str, position: &str) -> Reply {
        let position = match parse_position(position) {
            Ok(position) => position,
            Err(err) => return Reply::failed(err),
        };
        self.mutate(|doc, _| {
            remove(doc, list, position)?;
            Ok(format!("Removed task {position} from '{list}'."))
        })
    }

    pub fn delete_list(&self, list: &str) -> Reply {
        self.mutate(|doc, _| {
            delete_list(doc, list)?;
            Ok(format!("Deleted list '{list}'."))
        })
    }

    pub fn mark_done(&self, list: &str, position: &str) -> Reply {
        let position = match parse_position(position) {
            Ok(position) => position,
            Err(err) => return Reply::failed(err),
        };
        self.mutate(|doc, _| {
            mark_done(doc, list, position)?;
            Ok(format!("Task {position} marked as done."))
        })
    }

    fn mutate<F>(&self, op: F) -> Reply
    where
        F: FnOnce(&mut Document, &mut Vec<Notice>) -> Result<String, TasklineError>,
    {
        self.cycle(|store, loaded, doc, notices| {
            if loaded.blocks_save() {
                return Err(TasklineError::StorageUnavailable {
                    path: store.path().to_path_buf(),
                    reason: "the existing data file could not be loaded".to_string(),
                });
            }
            let message = op(doc, notices)?;
            store.save(doc)?;
            Ok(Body::Done(message))
        })
    }

    fn read<F>(&self, op: F) -> Reply
    where
        F: FnOnce(&Document) -> Result<Body, TasklineError>,
    {
        self.cycle(|_, _, doc, _| op(doc))
    }

    fn cycle<F>(&self, op: F) -> Reply
    where
        F: FnOnce(
            &Store,
            &LoadOutcome,
            &mut Document,
            &mut Vec<Notice>,
        ) -> Result<Body, TasklineError>,
    {
        let _lock = if self.locking {
            match self.store.lock() {
                Ok(lock) => Some(lock),
                Err(err) => {
                    return Reply::failed(TasklineError::StorageLocked {
                        path: lock_path(self.store.path()),
                        reason: err.to_string(),
                    })
                }
            }
        } else {
            None
        };

        let Loaded {
            document: mut doc,
            outcome: loaded,
        } = self.store.load();
        debug!(outcome = ?loaded, "store ready");
        let mut notices = load_notices(&loaded);
        let outcome = op(&self.store, &loaded, &mut doc, &mut notices);
        Reply { notices, outcome }
    }
}

fn load_notices(outcome: &LoadOutcome) -> Vec<Notice> {
    match outcome {
        LoadOutcome::Recovered { backup, .. } => vec![Notice::Warn(format!(
            "Data file was corrupted; backed up to '{}' and recreated.",
            backup.display()
        ))],
        LoadOutcome::Unreadable { reason } => {
            vec![Notice::Warn(format!("Could not read data file: {reason}"))]
        }
        LoadOutcome::BackupFailed { backup, reason } => vec![Notice::Warn(format!(
            "Data file is corrupted and could not be backed up to '{}' ({reason}); left untouched.",
            backup.display()
        ))],
        LoadOutcome::Loaded | LoadOutcome::Created | LoadOutcome::ListsInjected => Vec::new(),
    }
}
