//! Mutex-guarded task list mirrored to the store file.

use anyhow::Result;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;

use super::load::load_tasks;

/// The store file could not be rewritten. The in-memory list is already updated.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot persist task list to {}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Ordered list of pending tasks, shared by all workers of a run.
///
/// Every mutation holds the lock across filter + full file rewrite, so a
/// concurrent removal can never write back a stale list.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    tasks: Mutex<Vec<String>>,
}

impl TaskStore {
    /// In-memory store for `tasks`; nothing is written until the first mutation.
    pub fn new(path: impl Into<PathBuf>, tasks: Vec<String>) -> Self {
        let tasks = tasks.into_iter().filter(|t| !t.trim().is_empty()).collect();
        Self {
            path: path.into(),
            tasks: Mutex::new(tasks),
        }
    }

    /// Loads the store from `path` (missing file = empty store).
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let tasks = load_tasks(&path)?;
        Ok(Self::new(path, tasks))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy of the pending tasks in queue order.
    pub fn snapshot(&self) -> Vec<String> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Removes every entry equal to `task` and rewrites the store file.
    ///
    /// Returns the number of entries removed (0 if another worker already
    /// removed it). On `Err` the removal still holds in memory.
    pub fn remove_task(&self, task: &str) -> Result<usize, StoreError> {
        let mut tasks = self.lock();
        let before = tasks.len();
        tasks.retain(|t| t != task);
        let removed = before - tasks.len();
        write_atomic(&self.path, &tasks)?;
        Ok(removed)
    }

    /// Appends non-blank tasks and rewrites the store file. Returns how many were added.
    pub fn append<I>(&self, new_tasks: I) -> Result<usize, StoreError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut tasks = self.lock();
        let before = tasks.len();
        tasks.extend(
            new_tasks
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
        );
        let added = tasks.len() - before;
        write_atomic(&self.path, &tasks)?;
        Ok(added)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Writes `tasks` one per line to a temp file next to `path`, syncs it, then
/// renames it over `path`. Readers see the old file or the new one, never a mix.
fn write_atomic(path: &Path, tasks: &[String]) -> Result<(), StoreError> {
    let persist_err = |source: io::Error| StoreError::Persist {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(persist_err)?;
    {
        let mut w = BufWriter::new(tmp.as_file_mut());
        for task in tasks {
            writeln!(w, "{task}").map_err(persist_err)?;
        }
        w.flush().map_err(persist_err)?;
    }
    if let Ok(meta) = std::fs::metadata(path) {
        // Keep the user's mode instead of the temp file's 0600.
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(persist_err)?;
    }
    tmp.as_file().sync_all().map_err(persist_err)?;
    tmp.persist(path).map_err(|e| persist_err(e.error))?;
    Ok(())
}
