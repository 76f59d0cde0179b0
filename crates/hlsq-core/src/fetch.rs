//! External fetch tool invocation.
//!
//! The tool is treated as opaque: it is called as
//! `<program> [extra args..] -N <thread hint> -o <output path> <task url>`
//! and only its exit status is consumed.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use thiserror::Error;
use tokio::process::Command;

/// Program used when the config does not name one.
pub const DEFAULT_FETCH_PROGRAM: &str = "yt-dlp";

/// The fetch tool failed for one task.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to start {}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} exited with {status}", program.display())]
    Exit { program: PathBuf, status: ExitStatus },
}

/// A resolved fetch program plus the options passed on every invocation.
#[derive(Debug, Clone)]
pub struct FetchTool {
    program: PathBuf,
    extra_args: Vec<String>,
    thread_hint: String,
    show_output: bool,
}

impl FetchTool {
    pub fn new(program: impl Into<PathBuf>, thread_hint: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            extra_args: Vec::new(),
            thread_hint: thread_hint.into(),
            show_output: false,
        }
    }

    /// Resolves `program` on `PATH` (or as a path) so a missing tool aborts the
    /// run before any task is attempted.
    pub fn locate(program: &str, thread_hint: impl Into<String>) -> Result<Self> {
        let resolved = which::which(program)
            .with_context(|| format!("fetch program not found: {program}"))?;
        Ok(Self::new(resolved, thread_hint))
    }

    /// Arguments inserted before the `-N/-o/<url>` contract arguments.
    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    /// Pass the tool's stdout/stderr through instead of discarding them.
    pub fn with_output(mut self, show: bool) -> Self {
        self.show_output = show;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn thread_hint(&self) -> &str {
        &self.thread_hint
    }

    /// Full argument list for one invocation.
    pub fn args(&self, output: &Path, task: &str) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.extra_args.iter().map(OsString::from).collect();
        args.push("-N".into());
        args.push(self.thread_hint.clone().into());
        args.push("-o".into());
        args.push(output.as_os_str().to_owned());
        args.push(task.into());
        args
    }

    /// Runs the tool to completion for `task`, writing to `output`.
    /// Zero exit status is success; there is no timeout.
    pub async fn fetch(&self, output: &Path, task: &str) -> Result<(), FetchError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.args(output, task)).stdin(Stdio::null());
        if !self.show_output {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }

        let status = cmd.status().await.map_err(|e| FetchError::Spawn {
            program: self.program.clone(),
            source: e,
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(FetchError::Exit {
                program: self.program.clone(),
                status,
            })
        }
    }
}
