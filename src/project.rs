//! Project data structure.
//!
//! Projects are named groups of tasks. Tasks point at a project through its
//! `name`; the `id` is only used for identity on disk.

use serde::Serialize;
use serde_json::Value;

use crate::fields::id_from_value;
use crate::ids::new_id;

/// A named group of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub id: String,
    pub name: String,
}

impl Project {
    /// Create a project with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Project {
            id: new_id(),
            name: name.into(),
        }
    }

    /// Rebuild a project from a persisted record.
    pub fn from_record(record: &Value) -> Option<Project> {
        let obj = record.as_object()?;
        let id = id_from_value(obj.get("id"))?;
        let name = obj.get("name")?.as_str()?;
        Some(Project {
            id,
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_record() {
        let p = Project::from_record(&json!({"id": "1700000000000", "name": "Work"})).unwrap();
        assert_eq!(p.name, "Work");
        assert!(Project::from_record(&json!({"id": "1"})).is_none());
        assert!(Project::from_record(&json!({"name": "Work"})).is_none());
    }

    #[test]
    fn test_new_projects_get_distinct_ids() {
        let a = Project::new("Home");
        let b = Project::new("Home");
        assert_ne!(a.id, b.id);
    }
}
