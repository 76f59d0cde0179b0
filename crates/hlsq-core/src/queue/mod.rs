//! Pending task queue: the line-per-task store file and its in-memory mirror.
//!
//! `load` reads the initial task list at startup (file or interactive input);
//! `TaskStore` owns the list for the duration of a run and rewrites the file
//! after each completed task.

mod load;
mod store;

pub use load::{load_tasks, parse_tasks, read_tasks_interactive, DEFAULT_QUEUE_FILE, RUN_SENTINEL};
pub use store::{StoreError, TaskStore};
