//! `hlsq add <url>...` – append URLs to the queue.

use anyhow::{Context, Result};
use hlsq_core::config::HlsqConfig;
use hlsq_core::queue::TaskStore;

pub fn run_add(cfg: &HlsqConfig, urls: Vec<String>) -> Result<()> {
    let store = TaskStore::open(&cfg.queue_file)?;
    let added = store
        .append(urls)
        .with_context(|| format!("update queue file {}", cfg.queue_file.display()))?;
    println!(
        "Added {added} URL(s) to {} ({} queued)",
        cfg.queue_file.display(),
        store.len()
    );
    Ok(())
}
