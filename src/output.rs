//! User-facing output: colored messages and content rendering
//!
//! Messages go to stderr without logger decoration. Decoded content is
//! rendered either as JSON or as a plain text form suited to each format.

use owo_colors::OwoColorize;

use crate::models::{Content, Table};

/// Display a warning message to the user in yellow with padding
pub fn warn(message: &str) {
    eprintln!("\n{}\n", message.yellow());
}

/// Display an error message to the user in red with padding
///
/// # Example
/// ```ignore
/// output::error("Configuration file not found: config.conf");
/// ```
pub fn error(message: &str) {
    eprintln!("\n{}\n", message.red());
}

pub fn info(message: &str) {
    eprintln!("\n{}\n", message);
}

/// Serialize content as JSON, minified unless `pretty`
pub fn to_json(content: &impl serde::Serialize, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(content)
    } else {
        serde_json::to_string(content)
    }
}

/// Plain text rendering of decoded content
///
/// Text is returned unchanged, key-value maps as `key=value` lines, SQL as
/// one statement per line, tables as tab-separated rows (header first), and
/// JSON pretty-printed.
pub fn render_plain(content: &Content) -> String {
    match content {
        Content::Text(text) => text.clone(),
        Content::KeyValue(map) => map
            .iter()
            .map(|(key, value)| format!("{key}={value}\n"))
            .collect(),
        Content::Sql(statements) => statements.iter().map(|s| format!("{s}\n")).collect(),
        Content::Json(value) => {
            let mut rendered =
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
            rendered.push('\n');
            rendered
        }
        Content::Table(Table::Rows(rows)) => rows
            .iter()
            .map(|row| format!("{}\n", row.join("\t")))
            .collect(),
        Content::Table(Table::Records { columns, records }) => {
            let mut rendered = format!("{}\n", columns.join("\t"));
            for record in records {
                let fields: Vec<&str> = columns
                    .iter()
                    .map(|column| record.get(column).map(String::as_str).unwrap_or_default())
                    .collect();
                rendered.push_str(&fields.join("\t"));
                rendered.push('\n');
            }
            rendered
        }
    }
}
