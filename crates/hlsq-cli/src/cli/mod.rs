//! CLI for the hlsq batch downloader.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use hlsq_core::config::{self, ConfigOverrides};
use std::path::PathBuf;

use commands::{run_add, run_completions, run_downloads, run_remove, run_status};

/// Top-level CLI for hlsq.
#[derive(Debug, Parser)]
#[command(name = "hlsq")]
#[command(about = "hlsq: batch stream downloader with a durable URL queue", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/hlsq/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Queue file to use instead of the configured one.
    #[arg(long, global = true, value_name = "PATH")]
    pub queue_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download every queued URL; each is removed from the queue once its file is in place.
    Run(RunArgs),

    /// Append URLs to the queue.
    Add {
        /// Stream URLs (e.g. .m3u8 playlists).
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// List queued URLs and the filename each will be saved as.
    Status {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Remove a URL from the queue without downloading it.
    Remove {
        /// URL exactly as it appears in the queue.
        url: String,
    },

    /// Print shell completions to stdout.
    Completions {
        /// Target shell (bash, zsh, fish, elvish, powershell).
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Download up to N URLs at once (values below 1 mean 1).
    #[arg(long, short = 'j', value_name = "N", allow_negative_numbers = true)]
    pub jobs: Option<i64>,

    /// Fragment threads passed to the fetch tool as `-N`.
    #[arg(long, value_name = "N")]
    pub threads: Option<String>,

    /// Directory for in-progress downloads.
    #[arg(long, value_name = "PATH")]
    pub scratch_dir: Option<PathBuf>,

    /// Directory finished files are moved into.
    #[arg(long, value_name = "PATH")]
    pub target_dir: Option<PathBuf>,

    /// Always copy + delete into the target dir instead of trying rename first.
    #[arg(long)]
    pub copy: bool,

    /// Do not ask for URLs on stdin when the queue is empty.
    #[arg(long)]
    pub no_prompt: bool,
}

impl RunArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            concurrency: self.jobs,
            thread_hint: self.threads.clone(),
            scratch_dir: self.scratch_dir.clone(),
            target_dir: self.target_dir.clone(),
            queue_file: None,
            force_copy: self.copy,
        }
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = match cli.config.as_deref() {
            Some(path) => config::load_from_path(path)?,
            None => config::load_or_init()?,
        };
        if let Some(queue_file) = cli.queue_file {
            cfg.queue_file = queue_file;
        }
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Run(args) => {
                cfg.apply_overrides(&args.overrides());
                run_downloads(&cfg, !args.no_prompt).await?;
            }
            CliCommand::Add { urls } => run_add(&cfg, urls)?,
            CliCommand::Status { json } => run_status(&cfg, json)?,
            CliCommand::Remove { url } => run_remove(&cfg, &url)?,
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
