//! Path normalization shared by the indexer and the resolver
//!
//! Relative paths inside a tree index and lookup scopes use one convention:
//! components joined with `/`, no empty or `.` components, no leading or
//! trailing separator. Both sides of every prefix comparison go through
//! [`normalize_relative`] or [`relative_components`], so scoping behaves the
//! same on every platform.

use std::path::{Component, Path, PathBuf};

use crate::error::{ReaderError, Result};

/// Canonical separator for relative paths stored in the index
pub const SEPARATOR: char = '/';

fn is_separator(c: char) -> bool {
    c == SEPARATOR || std::path::is_separator(c)
}

/// Lexically normalize a root-relative path string
///
/// `.` and empty components are dropped, `..` removes the previous component
/// (or is kept when there is nothing to remove). Leading separators are
/// stripped, so the result is always relative to the root. An input that
/// reduces to nothing yields an empty string, meaning the root itself.
pub fn normalize_relative(raw: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for part in raw.split(is_separator) {
        match part {
            "" | "." => {}
            ".." => {
                if matches!(parts.last(), Some(last) if *last != "..") {
                    parts.pop();
                } else {
                    parts.push(part);
                }
            }
            _ => parts.push(part),
        }
    }
    parts.join("/")
}

/// Split a normalized name into its directory hint and base filename
///
/// `"sub/dir/foo.json"` yields `("sub/dir", "foo.json")`; a bare filename
/// yields an empty hint.
pub fn split_name(normalized: &str) -> (&str, &str) {
    match normalized.rfind(SEPARATOR) {
        Some(idx) => (&normalized[..idx], &normalized[idx + 1..]),
        None => ("", normalized),
    }
}

/// Join two root-relative fragments and normalize the result
pub fn join_relative(base: &str, tail: &str) -> String {
    match (base.is_empty(), tail.is_empty()) {
        (true, true) => String::new(),
        (true, false) => normalize_relative(tail),
        (false, true) => normalize_relative(base),
        (false, false) => normalize_relative(&format!("{base}/{tail}")),
    }
}

/// Render a path below `root` in the index convention
///
/// Returns `None` when `path` does not live under `root` or a component is
/// not valid UTF-8.
pub fn relative_components(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let mut parts = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(parts.join("/"))
}

/// Number of components in a relative path; files directly in the root have depth 1
pub fn depth(relative: &str) -> usize {
    let trimmed = relative.trim_matches(SEPARATOR);
    if trimmed.is_empty() {
        1
    } else {
        trimmed.matches(SEPARATOR).count() + 1
    }
}

/// Whether `relative` equals `scope` or lives below it
pub fn in_scope(relative: &str, scope: &str) -> bool {
    match relative.strip_prefix(scope) {
        Some("") => true,
        Some(rest) => rest.starts_with(SEPARATOR),
        None => false,
    }
}

/// Resolve `path` against the working directory and fold `.`/`..` lexically
///
/// Symlinks are not resolved; two spellings of the same directory map to the
/// same key only if they agree lexically.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        let cwd = std::env::current_dir().map_err(|e| ReaderError::io(".", e))?;
        cwd.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}
