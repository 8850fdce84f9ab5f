//! Command implementations for the CLI interface.
//!
//! Handlers own the checks the core leaves to its caller: titles and project
//! names must be non-empty after trimming, and a due date is required.

use std::fmt::Display;

use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::controller::TodoList;
use crate::error::{Error, Result};
use crate::fields::*;
use crate::filter::parse_due_date;
use crate::storage::KeyValueStore;
use crate::task::Task;

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new task.
    Add {
        /// Short title for the task.
        text: String,
        /// Due date: YYYY-MM-DD.
        #[arg(long)]
        due: Option<String>,
        /// Priority: low | medium | high. Anything else becomes medium.
        #[arg(long, default_value = "medium")]
        priority: String,
        /// Optional longer description.
        #[arg(long, default_value = "")]
        desc: String,
        /// Add the task to this project.
        #[arg(long)]
        project: Option<String>,
    },

    /// List the tasks of one view.
    List {
        /// View: inbox | today | this-week | project.
        #[arg(long, value_enum, default_value_t = ViewMode::Inbox)]
        view: ViewMode,
        /// Project name for the project view.
        #[arg(long)]
        project: Option<String>,
    },

    /// Show a single task.
    View {
        /// Task ID
        id: String,
    },

    /// Mark a task done.
    Done {
        /// Task ID
        id: String,
    },

    /// Mark a task not done.
    Undone {
        /// Task ID
        id: String,
    },

    /// Delete a task.
    Delete {
        /// Task ID
        id: String,
    },

    /// Change a task's priority.
    Priority {
        /// Task ID
        id: String,
        #[arg(value_enum)]
        priority: Priority,
    },

    /// Edit title and description, optionally moving the task.
    Edit {
        /// Task ID
        id: String,
        #[arg(long)]
        text: String,
        #[arg(long, default_value = "")]
        desc: String,
        /// Move to this project.
        #[arg(long, conflicts_with = "inbox")]
        project: Option<String>,
        /// Move to the inbox.
        #[arg(long)]
        inbox: bool,
    },

    /// Assign a task to a project, or to the inbox when no name is given.
    Assign {
        /// Task ID
        id: String,
        /// Project name.
        project: Option<String>,
    },

    /// Create a project.
    ProjectAdd {
        /// Project name.
        name: String,
    },

    /// List projects.
    Projects,

    /// Report tasks that point at missing projects or share an id.
    Check,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn fail(e: impl Display) -> ! {
    eprintln!("{e}");
    std::process::exit(1);
}

/// Trimmed, non-empty task title.
pub fn validate_title(text: &str) -> Result<String> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::InvalidInput("Please enter a task title!".into()));
    }
    Ok(text.to_string())
}

/// Required due date. Only presence is checked, as in the core.
pub fn validate_due(due: Option<&str>) -> Result<String> {
    match due.map(str::trim).filter(|d| !d.is_empty()) {
        Some(d) => Ok(d.to_string()),
        None => Err(Error::InvalidInput("Please select a due date!".into())),
    }
}

/// Trimmed, non-empty project name.
pub fn validate_project_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidInput("Project name cannot be empty.".into()));
    }
    Ok(name.to_string())
}

/// Render a due date as `Mar 5, 2024`, `No date` or `Invalid date`.
pub fn format_due_date(due: &str) -> String {
    if due.is_empty() {
        return "No date".into();
    }
    match parse_due_date(due) {
        Some(d) => d.format("%b %-d, %Y").to_string(),
        None => "Invalid date".into(),
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

/// Print tasks in a formatted table.
pub fn print_table(tasks: &[&Task]) {
    println!(
        "{:<36} {:<4} {:<6} {:<13} {:<14} {}",
        "ID", "Done", "Pri", "Due", "Project", "Task"
    );
    for t in tasks {
        let project = t.project.clone().filter(|p| !p.is_empty()).unwrap_or_else(|| "-".into());
        println!(
            "{:<36} {:<4} {:<6} {:<13} {:<14} {}",
            t.id,
            if t.completed { "[x]" } else { "[ ]" },
            t.priority.as_str(),
            format_due_date(&t.due_date),
            truncate(&project, 14),
            t.text
        );
    }
}

/// Add a new task, optionally inside a project.
pub fn cmd_add<S: KeyValueStore>(
    list: &mut TodoList<S>,
    text: String,
    due: Option<String>,
    priority: String,
    desc: String,
    project: Option<String>,
) {
    let text = validate_title(&text).unwrap_or_else(|e| fail(e));
    let due = validate_due(due.as_deref()).unwrap_or_else(|e| fail(e));
    if let Some(p) = project {
        let p = validate_project_name(&p).unwrap_or_else(|e| fail(e));
        list.set_current_project(Some(p.as_str()));
    }
    match list.add_task(&text, &due, &priority, desc.trim()) {
        Ok(task) => println!("Added task {}", task.id),
        Err(e) => fail(format!("Failed to save: {e}")),
    }
}

/// List the tasks of one view.
pub fn cmd_list<S: KeyValueStore>(list: &mut TodoList<S>, view: ViewMode, project: Option<String>) {
    let tasks = match (view, project) {
        (ViewMode::Project, Some(p)) => list.set_current_project(Some(p.as_str())),
        (mode, _) => list.show(mode),
    };
    if tasks.is_empty() {
        println!("No tasks.");
        return;
    }
    print_table(&tasks);
}

/// Show a single task in detail.
pub fn cmd_view<S: KeyValueStore>(list: &TodoList<S>, id: String) {
    let Some(task) = list.get(&id) else {
        fail(Error::TaskNotFound(id));
    };
    println!("ID:           {}", task.id);
    println!("Task:         {}", task.text);
    println!("Done:         {}", if task.completed { "yes" } else { "no" });
    println!("Priority:     {}", task.priority.as_str());
    println!("Due:          {}", format_due_date(&task.due_date));
    println!(
        "Project:      {}",
        task.project.as_deref().filter(|p| !p.is_empty()).unwrap_or("Inbox")
    );
    let description = if task.description.is_empty() {
        "No description."
    } else {
        task.description.as_str()
    };
    println!("Description:\n{description}");
}

/// Mark a task done or not done.
pub fn cmd_complete<S: KeyValueStore>(list: &mut TodoList<S>, id: String, completed: bool) {
    if let Err(e) = list.toggle_task_complete(&id, completed) {
        fail(e);
    }
    println!("{} {}", if completed { "Completed" } else { "Reopened" }, id);
}

/// Delete a task.
pub fn cmd_delete<S: KeyValueStore>(list: &mut TodoList<S>, id: String) {
    if let Err(e) = list.delete_task(&id) {
        fail(e);
    }
    println!("Deleted {}", id);
}

/// Change a task's priority.
pub fn cmd_priority<S: KeyValueStore>(list: &mut TodoList<S>, id: String, priority: Priority) {
    if let Err(e) = list.update_task_priority(&id, priority) {
        fail(e);
    }
    println!("Priority of {} set to {}", id, priority.as_str());
}

/// Edit text and description, reassigning the project only when it changes.
pub fn cmd_edit<S: KeyValueStore>(
    list: &mut TodoList<S>,
    id: String,
    text: String,
    desc: String,
    project: Option<String>,
    inbox: bool,
) {
    let text = validate_title(&text).unwrap_or_else(|_| fail("Task title cannot be empty."));
    if let Err(e) = list.update_task_details(&id, &text, desc.trim()) {
        fail(e);
    }
    let target = if inbox {
        Some(None)
    } else {
        project.map(|p| Some(p).filter(|p| !p.is_empty()))
    };
    if let Some(target) = target {
        let current = list.get(&id).and_then(|t| t.project.clone());
        if current != target {
            if let Err(e) = list.assign_task_to_project(&id, target.as_deref()) {
                fail(e);
            }
            tracing::info!(id = %id, project = ?target, "moved task");
        }
    }
    println!("Updated {}", id);
}

/// Assign a task to a project or the inbox.
pub fn cmd_assign<S: KeyValueStore>(list: &mut TodoList<S>, id: String, project: Option<String>) {
    let project = project.filter(|p| !p.is_empty());
    if let Err(e) = list.assign_task_to_project(&id, project.as_deref()) {
        fail(e);
    }
    println!("Moved {} to {}", id, project.as_deref().unwrap_or("Inbox"));
}

/// Create a project.
pub fn cmd_project_add<S: KeyValueStore>(list: &mut TodoList<S>, name: String) {
    let name = validate_project_name(&name).unwrap_or_else(|e| fail(e));
    match list.add_project(&name) {
        Ok(p) => println!("Added project {} ({})", p.name, p.id),
        Err(e) => fail(format!("Failed to save: {e}")),
    }
}

/// List projects with their task counts.
pub fn cmd_projects<S: KeyValueStore>(list: &TodoList<S>) {
    let names = list.data().project_names();
    if names.is_empty() {
        println!("No projects.");
        return;
    }
    for name in names {
        let count = list.filter_tasks(ViewMode::Project, Some(name)).len();
        println!("{:<24} {}", truncate(name, 24), count);
    }
}

/// Report dangling project references and duplicate ids.
pub fn cmd_check<S: KeyValueStore>(list: &TodoList<S>) {
    let dangling = list.dangling_project_refs();
    let dups = list.data().duplicate_task_ids();
    if dangling.is_empty() && dups.is_empty() {
        println!("OK");
        return;
    }
    for t in &dangling {
        println!(
            "Task {} refers to missing project '{}'",
            t.id,
            t.project.as_deref().unwrap_or_default()
        );
    }
    for id in &dups {
        println!("Task id {} is used more than once", id);
    }
    std::process::exit(1);
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "todo", &mut std::io::stdout());
}
