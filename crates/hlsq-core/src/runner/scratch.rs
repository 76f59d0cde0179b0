//! Scratch file naming.

use std::path::{Path, PathBuf};

use crate::filename::unix_nanos;

/// `<dir>/temp_<worker>_<unix nanos>.<extension>`. Unique across workers by
/// id and within a worker by timestamp, so workers share `dir` without locking.
pub fn scratch_path(dir: &Path, worker: usize, extension: &str) -> PathBuf {
    dir.join(format!("temp_{worker}_{}.{extension}", unix_nanos()))
}
