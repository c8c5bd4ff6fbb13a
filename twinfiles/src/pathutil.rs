//! Zero-width-character path handling.
//!
//! Certain app-storage directories are fenced off by the OS when addressed
//! by their plain name; inserting a zero-width space after "Android" slips
//! past the fence while leaving the visible path unchanged. This module
//! converts between the display form (clean) and the access form (marked).

use std::path::PathBuf;

const ZERO_WIDTH_SPACE: char = '\u{200B}';

/// All invisible characters stripped from incoming paths.
const ZERO_WIDTH_CHARS: &[char] = &[
    '\u{200B}', // zero width space
    '\u{200C}', // zero width non-joiner
    '\u{200D}', // zero width joiner
    '\u{FEFF}', // byte order mark
    '\u{180E}', // mongolian vowel separator
];

/// Path segments that require the zero-width marker for access.
const RESTRICTED_SEGMENTS: &[&str] = &["android/data", "android/obb"];

/// Remove every zero-width / invisible character from a path string.
pub fn strip_zero_width(path: &str) -> String {
    path.chars().filter(|c| !ZERO_WIDTH_CHARS.contains(c)).collect()
}

/// True if the cleaned path contains a restricted segment
/// (case-insensitive).
pub fn is_restricted(path: &str) -> bool {
    let clean = strip_zero_width(path).to_lowercase();
    RESTRICTED_SEGMENTS.iter().any(|seg| clean.contains(seg))
}

/// Insert a zero-width space after every "Android" (any case) when the
/// path contains a restricted segment; otherwise return the path as-is.
pub fn add_zero_width(path: &str) -> String {
    if !is_restricted(path) {
        return path.to_string();
    }
    let mut out = String::with_capacity(path.len() + 4);
    let mut byte = 0;
    while byte < path.len() {
        match path.get(byte..byte + 7) {
            Some(seg) if seg.eq_ignore_ascii_case("android") => {
                out.push_str(seg);
                out.push(ZERO_WIDTH_SPACE);
                byte += 7;
            }
            _ => {
                if let Some(ch) = path[byte..].chars().next() {
                    out.push(ch);
                    byte += ch.len_utf8();
                } else {
                    break;
                }
            }
        }
    }
    out
}

/// Resolve a user-supplied path for filesystem access: clean it, then
/// re-add the marker when the target is restricted.
pub fn resolve(path: &str) -> PathBuf {
    let clean = strip_zero_width(path);
    if is_restricted(&clean) {
        PathBuf::from(add_zero_width(&clean))
    } else {
        PathBuf::from(clean)
    }
}
