//! Stub fetch tools: small `sh` scripts that honor the `-N <n> -o <path> <url>`
//! argument contract.
//!
//! The script is run as `/bin/sh <script> -N ..` (script passed as an extra
//! argument) so tests never exec a file they just wrote.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use hlsq_core::config::HlsqConfig;
use hlsq_core::fetch::FetchTool;
use hlsq_core::queue::TaskStore;
use hlsq_core::runner::RunContext;

/// Writes the URL into the output file, unless the URL contains `FAIL`
/// (exit 1) or `EMPTY` (exit 0 without writing anything).
pub const FLAKY: &str = r#"
out="$4"
url="$5"
case "$url" in
  *FAIL*) exit 1 ;;
  *EMPTY*) exit 0 ;;
esac
printf '%s' "$url" > "$out"
"#;

/// Writes the output, then makes its directory read-only so the scratch file
/// can be copied out but not deleted.
pub const LOCK_SCRATCH: &str = r#"
out="$4"
printf '%s' "$5" > "$out"
chmod 555 "$(dirname "$out")"
"#;

/// Always succeeds; records how many invocations are running at once under
/// `<track_dir>/counts` (one line per invocation).
pub fn inflight_counter_script(track_dir: &Path) -> String {
    format!(
        r#"
track="{track}"
mkdir "$track/inflight/$$"
ls "$track/inflight" | wc -l >> "$track/counts"
sleep 0.2
printf '%s' "$5" > "$4"
rmdir "$track/inflight/$$"
"#,
        track = track_dir.display()
    )
}

/// Whether a read-only directory actually stops this process from writing
/// (false when running as root).
pub fn dir_permissions_enforced() -> bool {
    let dir = tempfile::tempdir().unwrap();
    set_mode(dir.path(), 0o555);
    let enforced = std::fs::write(dir.path().join("check"), b"").is_err();
    set_mode(dir.path(), 0o755);
    enforced
}

pub fn set_mode(path: &Path, mode: u32) {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).unwrap();
}

pub fn stub_tool(dir: &Path, script: &str) -> FetchTool {
    let path = dir.join("stub-fetch.sh");
    std::fs::write(&path, script).unwrap();
    FetchTool::new("/bin/sh", "4").with_extra_args(vec![path.display().to_string()])
}

pub struct Fixture {
    pub root: tempfile::TempDir,
    pub cfg: HlsqConfig,
    pub queue_file: PathBuf,
}

impl Fixture {
    pub fn new(tasks: &[&str], concurrency: i64) -> Self {
        let root = tempfile::tempdir().unwrap();
        let queue_file = root.path().join("aria2_links.txt");
        std::fs::write(&queue_file, tasks.join("\n")).unwrap();
        let cfg = HlsqConfig {
            concurrency,
            scratch_dir: root.path().join("scratch"),
            target_dir: root.path().join("target"),
            queue_file: queue_file.clone(),
            ..HlsqConfig::default()
        };
        Self {
            root,
            cfg,
            queue_file,
        }
    }

    pub fn context(&self, script: &str) -> Arc<RunContext> {
        let store = TaskStore::open(&self.queue_file).unwrap();
        self.context_with_store(script, store)
    }

    pub fn context_with_store(&self, script: &str, store: TaskStore) -> Arc<RunContext> {
        let tool = stub_tool(self.root.path(), script);
        Arc::new(RunContext::prepare(&self.cfg, Arc::new(store), tool).unwrap())
    }

    pub fn queue_lines(&self) -> Vec<String> {
        hlsq_core::queue::load_tasks(&self.queue_file).unwrap()
    }

    pub fn target_files(&self) -> Vec<String> {
        list(&self.cfg.target_dir)
    }

    pub fn scratch_files(&self) -> Vec<String> {
        list(&self.cfg.scratch_dir)
    }
}

fn list(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
