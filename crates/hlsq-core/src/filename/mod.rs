//! Target filename derivation.
//!
//! Derives the name a finished artifact is stored under from its task URL:
//! the last path segment, percent-decoded, with its extension replaced by the
//! container extension and reserved characters replaced by `_`.

mod path;
mod sanitize;

pub use path::{decoded_last_segment, parse_task_url};
pub use sanitize::{sanitize_reserved, RESERVED_CHARS};

use std::time::{SystemTime, UNIX_EPOCH};

/// Container extension yt-dlp remuxes HLS streams into by default.
pub const DEFAULT_EXTENSION: &str = "mp4";

/// Prefix for names generated when a task has no usable URL path.
const FALLBACK_PREFIX: &str = "unknown";

/// Linux NAME_MAX, in bytes.
const NAME_MAX: usize = 255;

/// Derives a filesystem-safe target filename for `task`.
///
/// Total: unparsable identifiers (malformed URL, whitespace, empty string,
/// root path) get `unknown_<unix nanos>.<extension>` instead of failing.
/// Long stems are cut on a char boundary so the name fits in 255 bytes.
///
/// # Examples
///
/// - `resolve_target_filename("https://x.test/18.%E8%A7%86%E9%A2%91.m3u8", "mp4")` → `"18.视频.mp4"`
/// - `resolve_target_filename("https://x.test/bad url", "mp4")` → `"unknown_1700000000000000000.mp4"`
pub fn resolve_target_filename(task: &str, extension: &str) -> String {
    let Some(segment) = decoded_last_segment(task) else {
        return fallback_filename(extension);
    };
    let stem = truncate_stem(strip_extension(&segment), extension);
    sanitize_reserved(&format!("{stem}.{extension}"))
}

/// Longest prefix of `stem` that leaves room for `.<extension>` within NAME_MAX.
fn truncate_stem<'a>(stem: &'a str, extension: &str) -> &'a str {
    let budget = NAME_MAX.saturating_sub(extension.len() + 1);
    if stem.len() <= budget {
        return stem;
    }
    let mut take = budget;
    while take > 0 && !stem.is_char_boundary(take) {
        take -= 1;
    }
    &stem[..take]
}

/// Timestamp-derived name used when a task URL yields no filename.
pub fn fallback_filename(extension: &str) -> String {
    sanitize_reserved(&format!("{FALLBACK_PREFIX}_{}.{extension}", unix_nanos()))
}

/// Nanoseconds since the Unix epoch (0 if the clock is before the epoch).
pub fn unix_nanos() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0)
}

/// Drops the text from the last `.` onward. Dotfiles like `.hidden` keep their name.
fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 && !name[idx..].contains('/') => &name[..idx],
        _ => name,
    }
}
