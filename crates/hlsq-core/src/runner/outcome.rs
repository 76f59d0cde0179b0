//! Per-task outcomes and the run summary.

use std::path::PathBuf;
use thiserror::Error;

use crate::fetch::FetchError;
use crate::relocate::RelocateError;

/// Why a task was left in the queue.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Relocate(#[from] RelocateError),
}

#[derive(Debug)]
pub enum TaskStatus {
    /// Artifact placed at `artifact`. `persisted` is false when the store file
    /// could not be rewritten (task is gone from memory but not from disk).
    Completed { artifact: PathBuf, persisted: bool },
    /// Task stays queued.
    Failed(TaskError),
}

/// One task's attempt: which worker ran it and how it ended.
#[derive(Debug)]
pub struct TaskOutcome {
    pub task: String,
    pub worker: usize,
    pub status: TaskStatus,
}

impl TaskOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self.status, TaskStatus::Completed { .. })
    }
}

/// Everything a run attempted, in completion order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<TaskOutcome>,
}

impl RunReport {
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    pub fn completed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_completed()).count()
    }

    pub fn failed(&self) -> usize {
        self.attempted() - self.completed()
    }

    /// Completed tasks whose removal did not reach the store file.
    pub fn unpersisted(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, TaskStatus::Completed { persisted: false, .. }))
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &TaskError)> {
        self.outcomes.iter().filter_map(|o| match &o.status {
            TaskStatus::Failed(e) => Some((o.task.as_str(), e)),
            TaskStatus::Completed { .. } => None,
        })
    }
}
