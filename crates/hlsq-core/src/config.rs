use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::fetch::DEFAULT_FETCH_PROGRAM;
use crate::filename::DEFAULT_EXTENSION;
use crate::queue::DEFAULT_QUEUE_FILE;
use crate::relocate::RelocateMode;

/// Global configuration loaded from `~/.config/hlsq/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HlsqConfig {
    /// Passed verbatim to the fetch tool's `-N` option (fragment threads per download).
    pub thread_hint: String,
    /// Number of tasks downloaded at once. Values below 1 mean 1.
    pub concurrency: i64,
    /// Where in-progress artifacts are written. Created at startup.
    pub scratch_dir: PathBuf,
    /// Where finished artifacts are placed (e.g. an rclone mount). Created at startup.
    pub target_dir: PathBuf,
    /// Pending task list, one URL per line.
    pub queue_file: PathBuf,
    /// Fetch program, looked up on PATH unless it is a path.
    pub fetch_program: String,
    /// Extra arguments placed before `-N <threads> -o <path> <url>`.
    pub fetch_args: Vec<String>,
    /// Extension for scratch and target files, without the dot.
    pub container_extension: String,
    /// "auto" (rename, copy on failure) or "copy" (always copy + delete).
    pub relocate_mode: RelocateMode,
    /// Show the fetch tool's own output instead of discarding it.
    pub show_tool_output: bool,
}

impl Default for HlsqConfig {
    fn default() -> Self {
        Self {
            thread_hint: "4".to_string(),
            concurrency: 1,
            scratch_dir: PathBuf::from("./temp_downloads"),
            target_dir: PathBuf::from("./completed"),
            queue_file: PathBuf::from(DEFAULT_QUEUE_FILE),
            fetch_program: DEFAULT_FETCH_PROGRAM.to_string(),
            fetch_args: Vec::new(),
            container_extension: DEFAULT_EXTENSION.to_string(),
            relocate_mode: RelocateMode::Auto,
            show_tool_output: false,
        }
    }
}

impl HlsqConfig {
    /// Effective worker count (at least 1).
    pub fn workers(&self) -> usize {
        usize::try_from(self.concurrency).unwrap_or(0).max(1)
    }

    /// Container extension without a leading dot; the default if blank.
    pub fn extension(&self) -> &str {
        let ext = self.container_extension.trim().trim_start_matches('.');
        if ext.is_empty() {
            DEFAULT_EXTENSION
        } else {
            ext
        }
    }

    /// Applies command-line overrides on top of file values.
    pub fn apply_overrides(&mut self, o: &ConfigOverrides) {
        if let Some(jobs) = o.concurrency {
            self.concurrency = jobs;
        }
        if let Some(ref threads) = o.thread_hint {
            self.thread_hint = threads.clone();
        }
        if let Some(ref dir) = o.scratch_dir {
            self.scratch_dir = dir.clone();
        }
        if let Some(ref dir) = o.target_dir {
            self.target_dir = dir.clone();
        }
        if let Some(ref file) = o.queue_file {
            self.queue_file = file.clone();
        }
        if o.force_copy {
            self.relocate_mode = RelocateMode::Copy;
        }
    }
}

/// Values given on the command line; `None` keeps the config file value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub concurrency: Option<i64>,
    pub thread_hint: Option<String>,
    pub scratch_dir: Option<PathBuf>,
    pub target_dir: Option<PathBuf>,
    pub queue_file: Option<PathBuf>,
    pub force_copy: bool,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("hlsq")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<HlsqConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = HlsqConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit file. Missing keys take their defaults.
pub fn load_from_path(path: &Path) -> Result<HlsqConfig> {
    let data = fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: HlsqConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = HlsqConfig::default();
        assert_eq!(cfg.thread_hint, "4");
        assert_eq!(cfg.workers(), 1);
        assert_eq!(cfg.scratch_dir, PathBuf::from("./temp_downloads"));
        assert_eq!(cfg.target_dir, PathBuf::from("./completed"));
        assert_eq!(cfg.queue_file, PathBuf::from("aria2_links.txt"));
        assert_eq!(cfg.fetch_program, "yt-dlp");
        assert_eq!(cfg.extension(), "mp4");
        assert_eq!(cfg.relocate_mode, RelocateMode::Auto);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = HlsqConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: HlsqConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.thread_hint, cfg.thread_hint);
        assert_eq!(parsed.concurrency, cfg.concurrency);
        assert_eq!(parsed.target_dir, cfg.target_dir);
        assert_eq!(parsed.relocate_mode, cfg.relocate_mode);
    }

    #[test]
    fn config_toml_partial_uses_defaults() {
        let toml = r#"
            concurrency = 3
            target_dir = "/mnt/rclone/videos"
            relocate_mode = "copy"
        "#;
        let cfg: HlsqConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.workers(), 3);
        assert_eq!(cfg.target_dir, PathBuf::from("/mnt/rclone/videos"));
        assert_eq!(cfg.relocate_mode, RelocateMode::Copy);
        assert_eq!(cfg.thread_hint, "4");
        assert!(cfg.fetch_args.is_empty());
    }

    #[test]
    fn non_positive_concurrency_means_one() {
        for n in [0, -3] {
            let cfg = HlsqConfig {
                concurrency: n,
                ..HlsqConfig::default()
            };
            assert_eq!(cfg.workers(), 1);
        }
    }

    #[test]
    fn extension_normalized() {
        let mut cfg = HlsqConfig {
            container_extension: ".mkv".into(),
            ..HlsqConfig::default()
        };
        assert_eq!(cfg.extension(), "mkv");
        cfg.container_extension = "  ".into();
        assert_eq!(cfg.extension(), "mp4");
    }

    #[test]
    fn overrides_win_over_file() {
        let mut cfg = HlsqConfig::default();
        cfg.apply_overrides(&ConfigOverrides {
            concurrency: Some(5),
            thread_hint: Some("16".into()),
            target_dir: Some(PathBuf::from("/data/out")),
            force_copy: true,
            ..ConfigOverrides::default()
        });
        assert_eq!(cfg.workers(), 5);
        assert_eq!(cfg.thread_hint, "16");
        assert_eq!(cfg.target_dir, PathBuf::from("/data/out"));
        assert_eq!(cfg.scratch_dir, PathBuf::from("./temp_downloads"));
        assert_eq!(cfg.relocate_mode, RelocateMode::Copy);
    }

    #[test]
    fn load_from_path_reports_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "concurrency = \"many\"").unwrap();
        let err = load_from_path(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parse config"));
    }
}
