//! # todo_list
//!
//! A local-first task list. Tasks carry a title, description, due date and
//! priority, and may be grouped into projects by name. Everything is kept in a
//! single JSON document that is rewritten after every change.
//!
//! ## Views
//!
//! - **Inbox**: tasks without a project
//! - **Today**: tasks due on the current local date
//! - **This week**: tasks due in the current week (Monday-first by default)
//! - **Project**: tasks whose project name matches the selected project
//!
//! ## Library use
//!
//! ```no_run
//! use todo_list::controller::TodoList;
//! use todo_list::fields::{ViewMode, WeekStart};
//! use todo_list::storage::{DocumentStore, FileStore};
//!
//! let store = DocumentStore::new(FileStore::new("/tmp/todo"));
//! let mut list = TodoList::new(store, WeekStart::Monday);
//! list.add_task("Buy milk", "2024-01-01", "high", "").unwrap();
//! for task in list.filter_tasks(ViewMode::Inbox, None) {
//!     println!("{}", task.text);
//! }
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod controller;
pub mod document;
pub mod error;
pub mod fields;
pub mod filter;
pub mod ids;
pub mod project;
pub mod storage;
pub mod task;

pub use error::{Error, Result};
