//! Bootstrap loading of the initial task list.

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Store file name used when the config does not set one.
pub const DEFAULT_QUEUE_FILE: &str = "aria2_links.txt";

/// Line that ends interactive task entry (case-insensitive).
pub const RUN_SENTINEL: &str = "run";

/// Splits store file text into tasks: one trimmed, non-empty line each.
pub fn parse_tasks(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads tasks from the store file. A missing file is an empty queue.
pub fn load_tasks(path: &Path) -> Result<Vec<String>> {
    let text = match std::fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e).with_context(|| format!("read task file: {}", path.display())),
    };
    Ok(parse_tasks(&text))
}

/// Prompts on `prompt` and collects one task per line from `input` until
/// [`RUN_SENTINEL`] or EOF. Blank lines are skipped.
pub fn read_tasks_interactive<R: BufRead, W: Write>(input: R, mut prompt: W) -> io::Result<Vec<String>> {
    writeln!(
        prompt,
        "Enter stream URLs, one per line; type '{RUN_SENTINEL}' to start downloading:"
    )?;
    prompt.flush()?;

    let mut tasks = Vec::new();
    for line in input.lines() {
        let line = line?;
        let text = line.trim();
        if text.eq_ignore_ascii_case(RUN_SENTINEL) {
            break;
        }
        if !text.is_empty() {
            tasks.push(text.to_string());
        }
    }
    Ok(tasks)
}
