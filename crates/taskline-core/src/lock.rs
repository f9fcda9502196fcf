//! Advisory lock held across one load -> operate -> save cycle.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

pub fn lock_path(store_path: &Path) -> PathBuf {
    let mut name = store_path.as_os_str().to_os_string();
    name.push(".lock");
    PathBuf::from(name)
}

#[derive(Debug)]
pub struct StoreLock {
    file: File,
    path: PathBuf,
}

impl StoreLock {
    /// Blocks until no other process holds the lock for `store_path`.
    pub fn acquire(store_path: &Path) -> io::Result<Self> {
        let path = lock_path(store_path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;
        file.lock_exclusive()?;
        debug!(path = %path.display(), "store lock acquired");
        Ok(Self { file, path })
    }

    /// Like `acquire`, but returns `None` instead of waiting.
    #[cfg(test)]
    fn try_acquire(store_path: &Path) -> io::Result<Option<Self>> {
        let path = lock_path(store_path);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;
        match file.try_lock_exclusive() {
            Ok(()) => Ok(Some(Self { file, path })),
            Err(err) if err.kind() == fs2::lock_contended_error().kind() => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
        debug!(path = %self.path.display(), "store lock released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lock_path_appends_suffix() {
        assert_eq!(
            lock_path(Path::new("data/tasks.json")),
            PathBuf::from("data/tasks.json.lock")
        );
    }

    #[test]
    fn second_lock_is_refused_until_first_is_dropped() {
        let temp = TempDir::new().expect("tempdir");
        let store = temp.path().join("tasks.json");

        let held = StoreLock::acquire(&store).expect("acquire");
        assert!(held.path().exists());
        assert!(StoreLock::try_acquire(&store).expect("try").is_none());

        drop(held);
        assert!(StoreLock::try_acquire(&store).expect("try").is_some());
    }
}
