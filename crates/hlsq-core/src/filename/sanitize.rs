//! Reserved-character replacement for target filenames.

/// Characters rejected by common target filesystems (SMB shares, rclone mounts, NTFS).
pub const RESERVED_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Replaces every reserved or control character in `name` with `_`.
/// Everything else, including non-ASCII text, is kept as-is.
pub fn sanitize_reserved(name: &str) -> String {
    name.chars()
        .map(|c| {
            if RESERVED_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect()
}
