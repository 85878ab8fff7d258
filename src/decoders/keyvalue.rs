//! `key=value` text decoder
//!
//! One assignment per line. Blank lines and lines starting with `#` are
//! skipped, keys and values are trimmed, and the first `=` splits the line.
//! A later assignment of the same key overrides an earlier one.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ReaderError, Result};

pub fn parse(path: &Path) -> Result<BTreeMap<String, String>> {
    let source = super::read_utf8(path)?;
    parse_str(&source).map_err(|message| ReaderError::decode(path, message))
}

/// Decode `key=value` text already in memory; the error is a line-numbered message
pub fn parse_str(source: &str) -> std::result::Result<BTreeMap<String, String>, String> {
    let mut map = BTreeMap::new();

    for (idx, line) in source.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(format!("line {}: expected key=value", idx + 1));
        };
        map.insert(key.trim().to_string(), value.trim().to_string());
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let map = parse_str("# bootstrap\n\nroot = /srv/data\n  name=demo  \n").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["root"], "/srv/data");
        assert_eq!(map["name"], "demo");
    }

    #[test]
    fn test_value_keeps_later_equals_signs() {
        let map = parse_str("dsn=postgres://u:p@h/db?sslmode=require").unwrap();
        assert_eq!(map["dsn"], "postgres://u:p@h/db?sslmode=require");
    }

    #[test]
    fn test_empty_value_is_kept() {
        let map = parse_str("root=\n").unwrap();
        assert_eq!(map["root"], "");
    }

    #[test]
    fn test_line_without_equals_is_rejected() {
        let err = parse_str("root=/srv\njust words\n").unwrap_err();
        assert_eq!(err, "line 2: expected key=value");
    }
}
