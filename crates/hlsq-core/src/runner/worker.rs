//! One worker: pulls tasks until the job channel is closed and drained.

use std::io;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

use crate::filename::resolve_target_filename;
use crate::queue::{StoreError, TaskStore};
use crate::relocate::relocate;

use super::context::RunContext;
use super::outcome::{TaskOutcome, TaskStatus};
use super::scratch::scratch_path;

pub(super) type JobReceiver = Arc<Mutex<mpsc::Receiver<String>>>;

/// Runs tasks one at a time until no job is left. A failed task never stops the worker.
pub(super) async fn run_worker(ctx: Arc<RunContext>, worker: usize, jobs: JobReceiver) -> Vec<TaskOutcome> {
    let mut outcomes = Vec::new();
    loop {
        let next = jobs.lock().await.recv().await;
        let Some(task) = next else {
            break;
        };
        let status = run_task(&ctx, worker, &task).await;
        outcomes.push(TaskOutcome {
            task,
            worker,
            status,
        });
    }
    tracing::debug!(worker, tasks = outcomes.len(), "worker finished");
    outcomes
}

async fn run_task(ctx: &RunContext, worker: usize, task: &str) -> TaskStatus {
    let filename = resolve_target_filename(task, ctx.extension());
    tracing::info!(worker, task, file = %filename, "task started");

    let scratch = scratch_path(ctx.scratch_dir(), worker, ctx.extension());
    if let Err(e) = ctx.fetch().fetch(&scratch, task).await {
        tracing::warn!(worker, task, "fetch failed, task stays queued: {}", e);
        return TaskStatus::Failed(e.into());
    }

    let dest = ctx.target_dir().join(&filename);
    tracing::debug!(worker, from = %scratch.display(), to = %dest.display(), "relocating artifact");
    if let Err(e) = relocate(&scratch, &dest, ctx.relocate_mode()).await {
        if e.is_placed() {
            tracing::warn!(worker, task, "artifact placed but scratch cleanup failed, task stays queued: {}", e);
        } else {
            tracing::warn!(worker, task, "relocation failed, task stays queued: {}", e);
        }
        discard_scratch(&scratch).await;
        return TaskStatus::Failed(e.into());
    }

    let persisted = match remove_from_store(Arc::clone(ctx.store()), task.to_string()).await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(worker, task, "task done but queue file not updated: {}", e);
            false
        }
    };
    tracing::info!(worker, file = %filename, "task completed");
    TaskStatus::Completed {
        artifact: dest,
        persisted,
    }
}

/// Store removal does blocking file I/O under the store lock.
async fn remove_from_store(store: Arc<TaskStore>, task: String) -> Result<usize, StoreError> {
    let path = store.path().to_path_buf();
    tokio::task::spawn_blocking(move || store.remove_task(&task))
        .await
        .unwrap_or_else(|e| {
            Err(StoreError::Persist {
                path,
                source: io::Error::new(io::ErrorKind::Other, e.to_string()),
            })
        })
}

async fn discard_scratch(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::debug!(path = %path.display(), "removed scratch file"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => tracing::debug!(path = %path.display(), "could not remove scratch file: {}", e),
    }
}
