//! `hlsq status` – list queued URLs with their target filenames.

use anyhow::Result;
use hlsq_core::config::HlsqConfig;
use hlsq_core::filename::{decoded_last_segment, resolve_target_filename};
use hlsq_core::queue::load_tasks;

/// Target name for display; `None` when it will be generated from the clock at download time.
fn planned_filename(task: &str, extension: &str) -> Option<String> {
    decoded_last_segment(task).map(|_| resolve_target_filename(task, extension))
}

pub fn run_status(cfg: &HlsqConfig, json: bool) -> Result<()> {
    let tasks = load_tasks(&cfg.queue_file)?;
    let ext = cfg.extension();

    if json {
        let rows: Vec<serde_json::Value> = tasks
            .iter()
            .map(|t| serde_json::json!({ "url": t, "file": planned_filename(t, ext) }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if tasks.is_empty() {
        println!("No queued URLs in {}.", cfg.queue_file.display());
        return Ok(());
    }
    println!("{:<4} {:<40} {}", "#", "FILE", "URL");
    for (i, t) in tasks.iter().enumerate() {
        let file = planned_filename(t, ext).unwrap_or_else(|| "(timestamp name)".to_string());
        println!("{:<4} {:<40} {}", i + 1, file, t);
    }
    Ok(())
}
