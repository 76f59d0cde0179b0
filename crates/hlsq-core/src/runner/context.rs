//! Run context: everything a worker needs, built once before the pool starts.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::HlsqConfig;
use crate::fetch::FetchTool;
use crate::queue::TaskStore;
use crate::relocate::RelocateMode;

/// Shared, read-only state for one run plus the task store workers mutate.
#[derive(Debug)]
pub struct RunContext {
    store: Arc<TaskStore>,
    fetch: FetchTool,
    scratch_dir: PathBuf,
    target_dir: PathBuf,
    extension: String,
    relocate_mode: RelocateMode,
    workers: usize,
}

impl RunContext {
    /// Builds a context with an explicit fetch tool. Creates the scratch and
    /// target directories; failing to do so aborts the run.
    pub fn prepare(cfg: &HlsqConfig, store: Arc<TaskStore>, fetch: FetchTool) -> Result<Self> {
        for dir in [&cfg.scratch_dir, &cfg.target_dir] {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("create directory: {}", dir.display()))?;
        }
        Ok(Self {
            store,
            fetch,
            scratch_dir: cfg.scratch_dir.clone(),
            target_dir: cfg.target_dir.clone(),
            extension: cfg.extension().to_string(),
            relocate_mode: cfg.relocate_mode,
            workers: cfg.workers(),
        })
    }

    /// Like [`prepare`](Self::prepare), resolving the fetch program from the config.
    pub fn from_config(cfg: &HlsqConfig, store: Arc<TaskStore>) -> Result<Self> {
        let fetch = FetchTool::locate(&cfg.fetch_program, cfg.thread_hint.clone())?
            .with_extra_args(cfg.fetch_args.clone())
            .with_output(cfg.show_tool_output);
        Self::prepare(cfg, store, fetch)
    }

    pub fn store(&self) -> &Arc<TaskStore> {
        &self.store
    }

    pub fn fetch(&self) -> &FetchTool {
        &self.fetch
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn relocate_mode(&self) -> RelocateMode {
        self.relocate_mode
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}
