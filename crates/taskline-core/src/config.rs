use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILENAME: &str = ".taskline.toml";
pub const DEFAULT_STORE_FILE: &str = "tasks.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TasklineConfig {
    /// Store file, relative to the working directory unless absolute.
    pub store_file: Option<String>,
    /// Take the advisory store lock around each command. Defaults to true.
    pub lock: Option<bool>,
}

impl TasklineConfig {
    pub fn store_path(&self, root: &Path) -> PathBuf {
        let name = self
            .store_file
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_STORE_FILE);
        root.join(name)
    }

    pub fn lock_enabled(&self) -> bool {
        self.lock.unwrap_or(true)
    }
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILENAME)
}

/// A missing config file yields defaults; a broken one is an error.
pub fn load_config(root: &Path) -> Result<TasklineConfig, ConfigError> {
    let path = config_path(root);
    if !path.is_file() {
        return Ok(TasklineConfig::default());
    }
    let text = fs::read_to_string(&path)?;
    Ok(toml::from_str::<TasklineConfig>(&text)?)
}

pub fn write_config(root: &Path, config: &TasklineConfig) -> Result<PathBuf, ConfigError> {
    let path = config_path(root);
    let body = toml::to_string_pretty(config)?;
    fs::write(&path, body)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_uses_defaults() {
        let temp = TempDir::new().expect("tempdir");
        let config = load_config(temp.path()).expect("load");
        assert_eq!(config, TasklineConfig::default());
        assert_eq!(config.store_path(temp.path()), temp.path().join("tasks.json"));
        assert!(config.lock_enabled());
    }

    #[test]
    fn write_then_load_config() {
        let temp = TempDir::new().expect("tempdir");
        let config = TasklineConfig {
            store_file: Some("data/todo.json".to_string()),
            lock: Some(false),
        };
        let path = write_config(temp.path(), &config).expect("write");
        assert_eq!(path, temp.path().join(CONFIG_FILENAME));

        let loaded = load_config(temp.path()).expect("load");
        assert_eq!(loaded, config);
        assert_eq!(
            loaded.store_path(temp.path()),
            temp.path().join("data").join("todo.json")
        );
        assert!(!loaded.lock_enabled());
    }

    #[test]
    fn blank_store_file_falls_back_to_default() {
        let config = TasklineConfig {
            store_file: Some("  ".to_string()),
            lock: None,
        };
        assert_eq!(config.store_path(Path::new("/w")), PathBuf::from("/w/tasks.json"));
    }

    #[test]
    fn broken_config_is_an_error() {
        let temp = TempDir::new().expect("tempdir");
        fs::write(config_path(temp.path()), "store_file = [").expect("write");
        assert!(matches!(load_config(temp.path()), Err(ConfigError::Parse(_))));
    }
}
