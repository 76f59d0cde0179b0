//! Worker pool that drains the task queue.
//!
//! Pipeline per task: resolve target filename → fetch into a scratch file →
//! relocate into target storage → remove the task from the store. A task is
//! only removed once its artifact is in place; every other outcome leaves it
//! queued for the next run.

mod context;
mod outcome;
mod pool;
mod scratch;
mod worker;

pub use context::RunContext;
pub use outcome::{RunReport, TaskError, TaskOutcome, TaskStatus};
pub use pool::run_queue;
pub use scratch::scratch_path;
