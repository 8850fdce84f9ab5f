//! Runtime configuration resolved from command-line flags and the environment.

use std::path::PathBuf;

use crate::fields::WeekStart;
use crate::storage::DEFAULT_KEY;

/// Environment variable overriding the data directory.
pub const DIR_ENV: &str = "TODO_DIR";

/// Where and how the document is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub week_start: WeekStart,
}

impl Config {
    /// Resolve from explicit values, falling back to `$TODO_DIR`, then
    /// `$HOME/.todo`, then `./.todo`.
    pub fn resolve(dir: Option<PathBuf>, key: Option<String>, week_start: WeekStart) -> Self {
        let data_dir = dir.unwrap_or_else(|| {
            default_data_dir(std::env::var(DIR_ENV).ok(), std::env::var("HOME").ok())
        });
        Config {
            data_dir,
            storage_key: key.unwrap_or_else(|| DEFAULT_KEY.to_string()),
            week_start,
        }
    }
}

fn default_data_dir(todo_dir: Option<String>, home: Option<String>) -> PathBuf {
    if let Some(dir) = todo_dir.filter(|d| !d.trim().is_empty()) {
        return PathBuf::from(dir);
    }
    let home = home.unwrap_or_else(|| ".".to_string());
    PathBuf::from(home).join(".todo")
}
