//! `hlsq run` – download everything in the queue.

use anyhow::Result;
use hlsq_core::config::HlsqConfig;
use hlsq_core::queue::{read_tasks_interactive, TaskStore};
use hlsq_core::runner::{run_queue, RunContext};
use std::io;
use std::sync::Arc;

/// Loads the queue (or asks for URLs on stdin when it is empty and `prompt`
/// is set), then runs the worker pool and prints a summary.
pub async fn run_downloads(cfg: &HlsqConfig, prompt: bool) -> Result<()> {
    let store = TaskStore::open(&cfg.queue_file)?;

    if store.is_empty() {
        println!("No queued URLs in {}.", cfg.queue_file.display());
        if !prompt {
            return Ok(());
        }
        let entered = read_tasks_interactive(io::stdin().lock(), io::stdout())?;
        if entered.is_empty() {
            println!("No URLs entered, nothing to do.");
            return Ok(());
        }
        // Persist right away so URLs that fail this run are retried next run.
        if let Err(e) = store.append(entered) {
            tracing::warn!("entered URLs not saved: {}", e);
        }
    }

    let store = Arc::new(store);
    let ctx = Arc::new(RunContext::from_config(cfg, Arc::clone(&store))?);
    println!(
        "Processing {} URL(s) with {} worker(s) via {} -N {}...",
        store.len(),
        ctx.workers(),
        ctx.fetch().program().display(),
        ctx.fetch().thread_hint()
    );

    let report = run_queue(ctx).await?;

    for (task, err) in report.failures() {
        println!("  failed: {task}: {err}");
    }
    println!(
        "Done: {} completed, {} failed, {} still queued.",
        report.completed(),
        report.failed(),
        store.len()
    );
    if report.unpersisted() > 0 {
        println!(
            "warning: {} completed URL(s) could not be removed from {}",
            report.unpersisted(),
            cfg.queue_file.display()
        );
    }
    Ok(())
}
