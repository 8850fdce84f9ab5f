//! Key-value persistence and the document store built on top of it.
//!
//! The whole document lives under one key and is rewritten on every save.
//! Loading never fails: anything unreadable degrades to an empty document and
//! individual bad records are dropped.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use serde_json::Value;

use crate::document::Document;
use crate::error::{Error, Result};
use crate::project::Project;
use crate::task::Task;

/// Key under which the document is stored unless configured otherwise.
pub const DEFAULT_KEY: &str = "todoAppData";

/// A string-keyed text store.
pub trait KeyValueStore {
    /// Read the value for `key`, `Ok(None)` when absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value for `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    /// Path of the file backing `key`. Keys must name a file directly
    /// inside the data directory.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

/// Reject empty keys and keys that could leave the data directory.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() || key.contains(['/', '\\']) || key.contains("..") {
        return Err(Error::InvalidInput(format!("invalid storage key '{key}'")));
    }
    Ok(())
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        // Atomic-ish write via temp + rename.
        let tmp = path.with_extension("json.tmp");
        let written = File::create(&tmp)
            .and_then(|mut f| {
                f.write_all(value.as_bytes())?;
                f.flush()
            })
            .and_then(|_| fs::rename(&tmp, &path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

/// In-memory store, mostly for tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads and writes the full document under a single key.
#[derive(Debug)]
pub struct DocumentStore<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> DocumentStore<S> {
    pub fn new(backend: S) -> Self {
        DocumentStore::with_key(backend, DEFAULT_KEY)
    }

    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        DocumentStore {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Serialize the document and overwrite the stored value.
    pub fn save(&mut self, doc: &Document) -> Result<()> {
        let data = serde_json::to_string(doc)?;
        tracing::debug!(
            key = %self.key,
            tasks = doc.tasks.len(),
            projects = doc.projects.len(),
            "saving document"
        );
        self.backend.set(&self.key, &data)
    }

    /// Load the document, substituting an empty one on any failure.
    pub fn load(&self) -> Document {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::info!(key = %self.key, "no saved data found, starting empty");
                return Document::default();
            }
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "failed to read saved data, starting empty");
                return Document::default();
            }
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => decode_document(&value).unwrap_or_else(|| {
                tracing::error!(key = %self.key, "invalid data structure in saved data, resetting");
                Document::default()
            }),
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "failed to parse saved data, starting empty");
                Document::default()
            }
        }
    }
}

/// Decode a parsed document, or `None` when `tasks` or `projects` is not an array.
pub fn decode_document(value: &Value) -> Option<Document> {
    let tasks = value.get("tasks")?.as_array()?;
    let projects = value.get("projects")?.as_array()?;

    let tasks: Vec<Task> = tasks
        .iter()
        .filter_map(|rec| {
            let task = Task::from_record(rec);
            if task.is_none() {
                tracing::warn!(record = %rec, "skipping invalid task data");
            }
            task
        })
        .collect();
    let projects: Vec<Project> = projects
        .iter()
        .filter_map(|rec| {
            let project = Project::from_record(rec);
            if project.is_none() {
                tracing::warn!(record = %rec, "skipping invalid project data");
            }
            project
        })
        .collect();

    tracing::debug!(tasks = tasks.len(), projects = projects.len(), "reconstructed document");
    Some(Document { tasks, projects })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Priority;

    fn store_with(raw: &str) -> DocumentStore<MemoryStore> {
        let mut backend = MemoryStore::new();
        backend.set(DEFAULT_KEY, raw).unwrap();
        DocumentStore::new(backend)
    }

    #[test]
    fn test_load_missing_is_empty() {
        let store = DocumentStore::new(MemoryStore::new());
        assert_eq!(store.load(), Document::default());
    }

    #[test]
    fn test_load_corrupt_is_empty() {
        assert_eq!(store_with("{not json").load(), Document::default());
        assert_eq!(store_with("null").load(), Document::default());
        assert_eq!(store_with(r#"{"tasks": []}"#).load(), Document::default());
        assert_eq!(store_with(r#"{"tasks": {}, "projects": []}"#).load(), Document::default());
    }

    #[test]
    fn test_round_trip() {
        let mut doc = Document::default();
        let mut t = Task::new("Buy milk", "2024-01-01", "high", true, "2 litres");
        t.project = Some("Home".into());
        doc.tasks.push(t);
        doc.tasks.push(Task::new("Call mum", "2024-01-02", "low", false, ""));
        doc.projects.push(Project::new("Home"));

        let mut store = DocumentStore::new(MemoryStore::new());
        store.save(&doc).unwrap();
        assert_eq!(store.load(), doc);
    }

    #[test]
    fn test_saved_shape_uses_camel_case() {
        let mut store = DocumentStore::new(MemoryStore::new());
        let mut doc = Document::default();
        doc.tasks.push(Task::new("x", "2024-01-01", "low", false, ""));
        store.save(&doc).unwrap();

        let raw = store.backend().get(DEFAULT_KEY).unwrap().unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        let task = &value["tasks"][0];
        assert_eq!(task["dueDate"], "2024-01-01");
        assert_eq!(task["priority"], "low");
        assert!(task["project"].is_null());
        assert!(value["projects"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_bogus_priority_on_load() {
        let store = store_with(
            r#"{"tasks": [{"id": "a", "text": "x", "dueDate": "2024-01-01", "priority": "bogus"}], "projects": []}"#,
        );
        assert_eq!(store.load().tasks[0].priority, Priority::Medium);
    }

    #[test]
    fn test_malformed_record_is_dropped() {
        let store = store_with(
            r#"{
                "tasks": [
                    {"id": "good", "text": "kept", "dueDate": "2024-01-01", "priority": "low", "completed": false, "project": null, "description": ""},
                    {"id": "bad", "text": "dropped", "priority": "low"}
                ],
                "projects": [{"id": "p1", "name": "Work"}, {"id": "p2"}]
            }"#,
        );
        let doc = store.load();
        assert_eq!(doc.tasks.len(), 1);
        assert_eq!(doc.tasks[0].id, "good");
        assert_eq!(doc.projects.len(), 1);
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key(DEFAULT_KEY).is_ok());
        assert!(validate_key("work.v2").is_ok());
        assert!(matches!(validate_key("../../x"), Err(Error::InvalidInput(_))));
        assert!(validate_key("a/b").is_err());
        assert!(validate_key("a\\b").is_err());
        assert!(validate_key("..").is_err());
        assert!(validate_key("").is_err());
    }

    #[test]
    fn test_file_store_rejects_escaping_key() {
        let store = FileStore::new("/tmp/todo-data");
        assert!(store.path_for("../outside").is_err());
        assert_eq!(
            store.path_for(DEFAULT_KEY).unwrap(),
            PathBuf::from("/tmp/todo-data/todoAppData.json")
        );
    }

    #[test]
    fn test_custom_key() {
        let mut store = DocumentStore::with_key(MemoryStore::new(), "other");
        store.save(&Document::default()).unwrap();
        assert!(store.backend().get("other").unwrap().is_some());
        assert!(store.backend().get(DEFAULT_KEY).unwrap().is_none());
    }
}
