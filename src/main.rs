//! # todo - local task list CLI
//!
//! ## Quick Start
//!
//! ```bash
//! # Add a task to the inbox
//! todo add "Buy milk" --due 2024-01-01 --priority high
//!
//! # Create a project and add a task to it
//! todo project-add Work
//! todo add "Write report" --due 2024-01-02 --project Work
//!
//! # Views
//! todo list                       # inbox
//! todo list --view today
//! todo list --view this-week
//! todo list --view project --project Work
//! ```
//!
//! Data is stored in `~/.todo/todoAppData.json` (override with `--dir`,
//! `$TODO_DIR` or `--key`). Set `RUST_LOG=debug` to see store activity.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use todo_list::cli::Cli;
use todo_list::cmd::*;
use todo_list::controller::TodoList;
use todo_list::storage::{DocumentStore, FileStore};

fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    // Completions don't need the store.
    if let Commands::Completions { shell } = cli.command {
        cmd_completions(shell);
        return;
    }

    let config = cli.config();
    tracing::debug!(dir = %config.data_dir.display(), key = %config.storage_key, "using store");
    let store = DocumentStore::with_key(FileStore::new(&config.data_dir), config.storage_key);
    let mut list = TodoList::new(store, config.week_start);

    match cli.command {
        Commands::Completions { .. } => unreachable!("completions handled above"),

        Commands::Add { text, due, priority, desc, project } =>
            cmd_add(&mut list, text, due, priority, desc, project),

        Commands::List { view, project } => cmd_list(&mut list, view, project),

        Commands::View { id } => cmd_view(&list, id),

        Commands::Done { id } => cmd_complete(&mut list, id, true),

        Commands::Undone { id } => cmd_complete(&mut list, id, false),

        Commands::Delete { id } => cmd_delete(&mut list, id),

        Commands::Priority { id, priority } => cmd_priority(&mut list, id, priority),

        Commands::Edit { id, text, desc, project, inbox } =>
            cmd_edit(&mut list, id, text, desc, project, inbox),

        Commands::Assign { id, project } => cmd_assign(&mut list, id, project),

        Commands::ProjectAdd { name } => cmd_project_add(&mut list, name),

        Commands::Projects => cmd_projects(&list),

        Commands::Check => cmd_check(&list),
    }
}
