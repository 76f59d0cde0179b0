//! Moves finished artifacts from scratch storage into target storage.
//!
//! Tries an atomic rename first. When that fails (typically EXDEV because the
//! target is another mount, e.g. an rclone FUSE directory) the bytes are
//! streamed into a freshly created destination and the source is deleted.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

/// How artifacts are placed into target storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelocateMode {
    /// Rename; on any rename failure fall back to copy + delete.
    #[default]
    Auto,
    /// Always copy + delete, never rename.
    Copy,
}

/// Relocation failure. Every variant except [`RelocateError::Cleanup`] means the
/// destination does not hold a complete artifact.
#[derive(Debug, Error)]
pub enum RelocateError {
    /// Source is absent or not a regular file (fetch tool produced nothing).
    #[error("source file missing (fetch produced no output?): {}", path.display())]
    SourceMissing { path: PathBuf },

    #[error("cannot open source {}", path.display())]
    OpenSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot create destination {}", path.display())]
    CreateDest {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("copy {} -> {} failed", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Artifact is complete at `dest` but the source could not be deleted.
    #[error("artifact placed at {} but source {} could not be deleted", dest.display(), path.display())]
    Cleanup {
        path: PathBuf,
        dest: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RelocateError {
    /// True when the destination already holds the complete artifact.
    pub fn is_placed(&self) -> bool {
        matches!(self, RelocateError::Cleanup { .. })
    }
}

/// Moves `source` to `dest`.
///
/// On `Ok`, `dest` holds the complete artifact and `source` no longer exists.
/// A missing source is reported before `dest` is touched.
pub async fn relocate(source: &Path, dest: &Path, mode: RelocateMode) -> Result<(), RelocateError> {
    match fs::metadata(source).await {
        Ok(meta) if meta.is_file() => {}
        _ => {
            return Err(RelocateError::SourceMissing {
                path: source.to_path_buf(),
            })
        }
    }

    if mode == RelocateMode::Auto {
        match fs::rename(source, dest).await {
            Ok(()) => return Ok(()),
            Err(e) => tracing::debug!(
                from = %source.display(),
                to = %dest.display(),
                "rename failed ({}), copying instead",
                e
            ),
        }
    }

    copy_then_remove(source, dest).await
}

async fn copy_then_remove(source: &Path, dest: &Path) -> Result<(), RelocateError> {
    let mut input = File::open(source)
        .await
        .map_err(|e| RelocateError::OpenSource {
            path: source.to_path_buf(),
            source: e,
        })?;

    let mut output = match File::create(dest).await {
        Ok(f) => f,
        Err(e) => {
            drop(input);
            return Err(RelocateError::CreateDest {
                path: dest.to_path_buf(),
                source: e,
            });
        }
    };

    let copied = copy_all(&mut input, &mut output).await;
    // Both handles are closed before the source is deleted or the error surfaces.
    drop(input);
    drop(output);

    match copied {
        Ok(bytes) => tracing::debug!(bytes, to = %dest.display(), "copied artifact"),
        Err(e) => {
            discard_partial(dest).await;
            return Err(RelocateError::Copy {
                from: source.to_path_buf(),
                to: dest.to_path_buf(),
                source: e,
            });
        }
    }

    fs::remove_file(source)
        .await
        .map_err(|e| RelocateError::Cleanup {
            path: source.to_path_buf(),
            dest: dest.to_path_buf(),
            source: e,
        })
}

async fn copy_all(input: &mut File, output: &mut File) -> io::Result<u64> {
    let bytes = tokio::io::copy(input, output).await?;
    output.flush().await?;
    output.sync_all().await?;
    Ok(bytes)
}

async fn discard_partial(dest: &Path) {
    match fs::remove_file(dest).await {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %dest.display(), "could not remove partial copy: {}", e),
    }
}
