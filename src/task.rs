//! Task data structure, its factory and its load-time reconstruction.
//!
//! A task refers to its project by name, not by id. The reference is weak:
//! nothing guarantees a project with that name exists (see
//! `Document::dangling_project_refs`).

use serde::Serialize;
use serde_json::Value;

use crate::fields::*;
use crate::ids::new_id;

/// A single to-do item.
///
/// Only serialized through serde; reading goes through `Task::from_record`
/// so that every loaded field passes the same coercion as the factory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub text: String,
    pub description: String,
    /// `YYYY-MM-DD`, stored verbatim and only parsed when filtering.
    pub due_date: String,
    pub priority: Priority,
    pub completed: bool,
    pub project: Option<String>,
}

impl Task {
    /// Create a task with a fresh id and no project.
    pub fn new(
        text: impl Into<String>,
        due_date: impl Into<String>,
        priority: &str,
        completed: bool,
        description: impl Into<String>,
    ) -> Self {
        Task {
            id: new_id(),
            text: text.into(),
            description: description.into(),
            due_date: due_date.into(),
            priority: Priority::coerce(priority),
            completed,
            project: None,
        }
    }

    /// Rebuild a task from a persisted record, or `None` when the record lacks
    /// a string `text`, a truthy `id` or a non-empty `dueDate`.
    pub fn from_record(record: &Value) -> Option<Task> {
        let obj = record.as_object()?;
        let text = obj.get("text")?.as_str()?;
        let id = id_from_value(obj.get("id"))?;
        let due_date = obj
            .get("dueDate")
            .and_then(Value::as_str)
            .filter(|d| !d.is_empty())?;

        Some(Task {
            id,
            text: text.to_string(),
            description: obj
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            due_date: due_date.to_string(),
            priority: Priority::coerce_value(obj.get("priority")),
            completed: is_truthy(obj.get("completed")),
            project: obj
                .get("project")
                .and_then(Value::as_str)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
        })
    }

    /// True when the task has no project (null or empty name).
    pub fn in_inbox(&self) -> bool {
        self.project.as_deref().map_or(true, str::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_task_defaults() {
        let t = Task::new("Buy milk", "2024-01-01", "high", false, "");
        assert_eq!(t.text, "Buy milk");
        assert_eq!(t.due_date, "2024-01-01");
        assert_eq!(t.priority, Priority::High);
        assert!(!t.completed);
        assert!(t.project.is_none());
        assert!(t.description.is_empty());
    }

    #[test]
    fn test_new_task_coerces_priority() {
        let t = Task::new("x", "2024-01-01", "bogus", false, "");
        assert_eq!(t.priority, Priority::Medium);
    }

    #[test]
    fn test_from_record_coerces_fields() {
        let rec = json!({
            "id": "t1",
            "text": "Write report",
            "dueDate": "2024-02-03",
            "priority": "bogus",
            "completed": 1,
            "project": "",
        });
        let t = Task::from_record(&rec).unwrap();
        assert_eq!(t.priority, Priority::Medium);
        assert!(t.completed);
        assert!(t.project.is_none());
        assert_eq!(t.description, "");
    }

    #[test]
    fn test_from_record_rejects_missing_fields() {
        assert!(Task::from_record(&json!({"id": "a", "text": "x"})).is_none());
        assert!(Task::from_record(&json!({"id": "a", "text": 5, "dueDate": "2024-01-01"})).is_none());
        assert!(Task::from_record(&json!({"id": "", "text": "x", "dueDate": "2024-01-01"})).is_none());
        assert!(Task::from_record(&json!({"text": "x", "dueDate": "2024-01-01"})).is_none());
        assert!(Task::from_record(&json!(null)).is_none());
        assert!(Task::from_record(&json!("task")).is_none());
    }

    #[test]
    fn test_from_record_accepts_numeric_id() {
        let t = Task::from_record(&json!({"id": 42, "text": "x", "dueDate": "2024-01-01"})).unwrap();
        assert_eq!(t.id, "42");
    }

    #[test]
    fn test_in_inbox() {
        let mut t = Task::new("x", "2024-01-01", "low", false, "");
        assert!(t.in_inbox());
        t.project = Some(String::new());
        assert!(t.in_inbox());
        t.project = Some("Work".into());
        assert!(!t.in_inbox());
    }
}
