//! Fixed-size worker pool over a job channel filled once and closed.

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;

use super::context::RunContext;
use super::outcome::RunReport;
use super::worker::run_worker;

/// Attempts every task currently in the store exactly once, with at most
/// `ctx.workers()` in flight. Returns after all workers have exited.
///
/// Tasks are handed out in queue order; completion order is unspecified.
pub async fn run_queue(ctx: Arc<RunContext>) -> Result<RunReport> {
    let tasks = ctx.store().snapshot();
    if tasks.is_empty() {
        return Ok(RunReport::default());
    }

    let workers = ctx.workers();
    tracing::info!(tasks = tasks.len(), workers, "run started");

    let (tx, rx) = mpsc::channel::<String>(tasks.len());
    let rx = Arc::new(Mutex::new(rx));

    let mut join_set = JoinSet::new();
    for worker in 1..=workers {
        join_set.spawn(run_worker(Arc::clone(&ctx), worker, Arc::clone(&rx)));
    }

    for task in tasks {
        tx.send(task).await.context("job channel closed early")?;
    }
    drop(tx);

    let mut report = RunReport::default();
    while let Some(res) = join_set.join_next().await {
        match res {
            Ok(outcomes) => report.outcomes.extend(outcomes),
            Err(e) => tracing::error!("worker task join: {}", e),
        }
    }

    tracing::info!(
        completed = report.completed(),
        failed = report.failed(),
        "run finished"
    );
    Ok(report)
}
