//! `hlsq remove <url>` – drop a URL from the queue.

use anyhow::{Context, Result};
use hlsq_core::config::HlsqConfig;
use hlsq_core::queue::TaskStore;

pub fn run_remove(cfg: &HlsqConfig, url: &str) -> Result<()> {
    let url = url.trim();
    let store = TaskStore::open(&cfg.queue_file)?;
    if !store.snapshot().iter().any(|t| t == url) {
        println!("Not queued: {url}");
        return Ok(());
    }
    store
        .remove_task(url)
        .with_context(|| format!("update queue file {}", cfg.queue_file.display()))?;
    println!("Removed {url} ({} queued)", store.len());
    Ok(())
}
