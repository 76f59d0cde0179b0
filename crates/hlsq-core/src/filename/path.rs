//! Task URL parsing and last-segment extraction.

use url::Url;

/// Parses a task identifier as an absolute URL.
///
/// Identifiers containing whitespace or control characters are rejected even
/// though the WHATWG parser would accept them by percent-encoding.
pub fn parse_task_url(task: &str) -> Option<Url> {
    if task.is_empty() || task.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return None;
    }
    Url::parse(task).ok()
}

/// Returns the last non-empty path segment of `task`, percent-decoded.
///
/// Returns `None` if the task is not a usable URL or its path is empty/root.
/// A segment that does not decode to valid UTF-8, or decodes to control
/// characters, is returned still encoded.
pub fn decoded_last_segment(task: &str) -> Option<String> {
    let parsed = parse_task_url(task)?;
    let segment = parsed.path_segments()?.filter(|s| !s.is_empty()).last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(percent_decode_or_keep(segment))
}

fn percent_decode_or_keep(segment: &str) -> String {
    match urlencoding::decode(segment) {
        Ok(decoded) if !decoded.is_empty() && !decoded.chars().any(char::is_control) => {
            decoded.into_owned()
        }
        _ => segment.to_string(),
    }
}
