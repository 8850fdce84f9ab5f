//! The persisted document: every task and project, in insertion order.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::project::Project;
use crate::task::Task;

/// In-memory copy of everything the store holds.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub tasks: Vec<Task>,
    pub projects: Vec<Project>,
}

impl Document {
    /// Get a task by id.
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Get a mutable reference to a task by id.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Remove every task with the given id. Returns how many were removed.
    pub fn remove_task(&mut self, id: &str) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        before - self.tasks.len()
    }

    /// Project names in insertion order.
    pub fn project_names(&self) -> Vec<&str> {
        self.projects.iter().map(|p| p.name.as_str()).collect()
    }

    /// Tasks whose non-empty project name matches no existing project.
    pub fn dangling_project_refs(&self) -> Vec<&Task> {
        let names: BTreeSet<&str> = self.projects.iter().map(|p| p.name.as_str()).collect();
        self.tasks
            .iter()
            .filter(|t| match t.project.as_deref() {
                Some(p) if !p.is_empty() => !names.contains(p),
                _ => false,
            })
            .collect()
    }

    /// Task ids that occur more than once.
    pub fn duplicate_task_ids(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        let mut dups = BTreeSet::new();
        for t in &self.tasks {
            if !seen.insert(t.id.as_str()) {
                dups.insert(t.id.as_str());
            }
        }
        dups.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        let mut a = Task::new("a", "2024-01-01", "low", false, "");
        a.project = Some("Work".into());
        let mut b = Task::new("b", "2024-01-01", "low", false, "");
        b.project = Some("Gone".into());
        let c = Task::new("c", "2024-01-01", "low", false, "");
        Document {
            tasks: vec![a, b, c],
            projects: vec![Project::new("Work")],
        }
    }

    #[test]
    fn test_dangling_project_refs() {
        let d = doc();
        let dangling = d.dangling_project_refs();
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].text, "b");
    }

    #[test]
    fn test_project_names_keep_insertion_order() {
        let mut d = doc();
        d.projects.push(Project::new("Home"));
        d.projects.push(Project::new("Errands"));
        assert_eq!(d.project_names(), vec!["Work", "Home", "Errands"]);
    }

    #[test]
    fn test_remove_task() {
        let mut d = doc();
        let id = d.tasks[1].id.clone();
        assert_eq!(d.remove_task(&id), 1);
        assert_eq!(d.remove_task(&id), 0);
        assert_eq!(d.tasks.len(), 2);
        assert!(d.get(&id).is_none());
    }

    #[test]
    fn test_duplicate_task_ids() {
        let mut d = doc();
        assert!(d.duplicate_task_ids().is_empty());
        let mut copy = d.tasks[0].clone();
        copy.text = "copy".into();
        let id = copy.id.clone();
        d.tasks.push(copy);
        assert_eq!(d.duplicate_task_ids(), vec![id.as_str()]);
    }
}
