//! The application controller.
//!
//! `TodoList` owns the document, the selected-project cursor and the current
//! view. Every mutation writes the whole document back through the store
//! before returning.

use chrono::{Local, NaiveDate};

use crate::document::Document;
use crate::error::{Error, Result};
use crate::fields::{Priority, ViewMode, WeekStart};
use crate::filter::filter_tasks;
use crate::project::Project;
use crate::storage::{DocumentStore, KeyValueStore};
use crate::task::Task;

/// In-memory task list synchronised with a `DocumentStore`.
#[derive(Debug)]
pub struct TodoList<S> {
    store: DocumentStore<S>,
    data: Document,
    current_project: Option<String>,
    current_view: ViewMode,
    week_start: WeekStart,
}

impl<S: KeyValueStore> TodoList<S> {
    /// Load the stored document and start on the inbox view.
    pub fn new(store: DocumentStore<S>, week_start: WeekStart) -> Self {
        let data = store.load();
        tracing::info!(
            tasks = data.tasks.len(),
            projects = data.projects.len(),
            "todo list loaded"
        );
        TodoList {
            store,
            data,
            current_project: None,
            current_view: ViewMode::Inbox,
            week_start,
        }
    }

    pub fn data(&self) -> &Document {
        &self.data
    }

    pub fn tasks(&self) -> &[Task] {
        &self.data.tasks
    }

    pub fn projects(&self) -> &[Project] {
        &self.data.projects
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.data.get(id)
    }

    pub fn current_project(&self) -> Option<&str> {
        self.current_project.as_deref()
    }

    pub fn current_view(&self) -> ViewMode {
        self.current_view
    }

    pub fn store(&self) -> &DocumentStore<S> {
        &self.store
    }

    fn persist(&mut self) -> Result<()> {
        self.store.save(&self.data)
    }

    /// Create a task in the selected project (if any) and persist it.
    pub fn add_task(
        &mut self,
        text: &str,
        due_date: &str,
        priority: &str,
        description: &str,
    ) -> Result<Task> {
        let mut task = Task::new(text, due_date, priority, false, description);
        if let Some(project) = &self.current_project {
            task.project = Some(project.clone());
        }
        tracing::debug!(id = %task.id, project = ?task.project, "adding task");
        self.data.tasks.push(task.clone());
        self.persist()?;
        Ok(task)
    }

    /// Create a project and persist it. Names are not checked for uniqueness.
    pub fn add_project(&mut self, name: &str) -> Result<Project> {
        let project = Project::new(name);
        tracing::debug!(id = %project.id, name, "adding project");
        self.data.projects.push(project.clone());
        self.persist()?;
        Ok(project)
    }

    /// Remove every task with `id`.
    pub fn delete_task(&mut self, id: &str) -> Result<()> {
        if self.data.remove_task(id) == 0 {
            return Err(Error::TaskNotFound(id.to_string()));
        }
        self.persist()
    }

    pub fn toggle_task_complete(&mut self, id: &str, completed: bool) -> Result<()> {
        self.task_mut(id)?.completed = completed;
        self.persist()
    }

    pub fn update_task_priority(&mut self, id: &str, priority: Priority) -> Result<()> {
        self.task_mut(id)?.priority = priority;
        self.persist()?;
        tracing::info!(id, priority = priority.as_str(), "updated task priority");
        Ok(())
    }

    /// Overwrite text and description. Emptiness is checked by callers.
    pub fn update_task_details(&mut self, id: &str, text: &str, description: &str) -> Result<()> {
        let task = self.task_mut(id).map_err(|e| {
            tracing::error!(id, "task not found for update");
            e
        })?;
        task.text = text.to_string();
        task.description = description.to_string();
        self.persist()?;
        tracing::info!(id, text, description, "updated task details");
        Ok(())
    }

    /// Point a task at a project name, or at none. The name is not checked
    /// against the project list.
    pub fn assign_task_to_project(&mut self, id: &str, project: Option<&str>) -> Result<()> {
        self.task_mut(id)?.project = named(project).map(str::to_string);
        self.persist()
    }

    /// Select a project (or none) and return the matching project view.
    /// An empty name selects none.
    pub fn set_current_project(&mut self, name: Option<&str>) -> Vec<&Task> {
        let name = named(name);
        self.current_project = name.map(str::to_string);
        self.current_view = if name.is_some() {
            ViewMode::Project
        } else {
            ViewMode::Inbox
        };
        self.filter_tasks(ViewMode::Project, None)
    }

    /// Switch to `mode` and return its tasks. Non-project views clear the
    /// selected project.
    pub fn show(&mut self, mode: ViewMode) -> Vec<&Task> {
        self.current_view = mode;
        if mode != ViewMode::Project {
            self.current_project = None;
        }
        self.filter_tasks(mode, None)
    }

    /// Re-derive whichever view is current.
    pub fn refresh_current_view(&self) -> Vec<&Task> {
        tracing::debug!(view = ?self.current_view, project = ?self.current_project, "refreshing view");
        self.filter_tasks(self.current_view, None)
    }

    /// Filter with today's local date. A non-empty `project_override` wins
    /// over the selected project in `ViewMode::Project`.
    pub fn filter_tasks(&self, mode: ViewMode, project_override: Option<&str>) -> Vec<&Task> {
        self.filter_tasks_on(mode, project_override, Local::now().date_naive())
    }

    /// Same as `filter_tasks` for an explicit `today`.
    pub fn filter_tasks_on(
        &self,
        mode: ViewMode,
        project_override: Option<&str>,
        today: NaiveDate,
    ) -> Vec<&Task> {
        let project = named(project_override).or(self.current_project.as_deref());
        filter_tasks(&self.data.tasks, mode, project, today, self.week_start)
    }

    /// Tasks referring to a project name that no project carries.
    pub fn dangling_project_refs(&self) -> Vec<&Task> {
        self.data.dangling_project_refs()
    }

    fn task_mut(&mut self, id: &str) -> Result<&mut Task> {
        self.data
            .get_mut(id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))
    }
}

/// Empty project names mean "no project".
fn named(project: Option<&str>) -> Option<&str> {
    project.filter(|p| !p.is_empty())
}
