//! SQL statement-list decoder
//!
//! Lines are trimmed; blank lines and `--` comment lines are skipped. Lines
//! accumulate into the current statement until one ends with `;`, and the
//! collected lines are joined with a single space. Trailing text without a
//! terminating `;` becomes a final statement.

use std::path::Path;

use crate::error::Result;

pub fn parse(path: &Path) -> Result<Vec<String>> {
    let source = super::read_utf8(path)?;
    Ok(split_statements(&source))
}

pub fn split_statements(source: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("--") {
            continue;
        }
        current.push(line);
        if line.ends_with(';') {
            statements.push(current.join(" "));
            current.clear();
        }
    }

    if !current.is_empty() {
        statements.push(current.join(" "));
    }

    statements
}
