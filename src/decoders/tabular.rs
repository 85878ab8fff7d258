//! CSV decoder with delimiter detection
//!
//! When no delimiter is supplied, the first [`SNIFF_BYTES`] bytes are
//! inspected. A candidate qualifies when it appears the same non-zero number
//! of times (outside double quotes) on every complete sample line. The most
//! frequent qualifying candidate wins, ties going to the earlier entry in
//! [`CANDIDATES`]. If nothing qualifies the delimiter is a comma.
//!
//! With a header row, each row becomes a column-name to field mapping. Rows
//! shorter than the header get empty strings for the missing columns; fields
//! beyond the header are dropped. Blank lines are skipped in both modes.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ReaderError, Result};
use crate::models::Table;

/// Number of leading bytes inspected for delimiter detection
pub const SNIFF_BYTES: usize = 2048;

/// Delimiters considered during detection, in tie-break order
pub const CANDIDATES: [u8; 5] = [b',', b'\t', b';', b'|', b':'];

/// Delimiter used when detection finds no consistent candidate
pub const DEFAULT_DELIMITER: u8 = b',';

/// Options for [`parse`]
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Treat the first row as column names
    pub has_header: bool,
    /// Field delimiter; detected from the file when `None`
    pub delimiter: Option<u8>,
    /// Columns that must be present in the header row
    pub required_columns: Vec<String>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: None,
            required_columns: Vec::new(),
        }
    }
}

pub fn parse(path: &Path, options: &CsvOptions) -> Result<Table> {
    let source = super::read_utf8(path)?;

    let delimiter = match options.delimiter {
        Some(delimiter) => delimiter,
        None => sniff_delimiter(sample(&source)).unwrap_or_else(|| {
            log::debug!(
                "Could not detect delimiter for {}, defaulting to ','",
                path.display()
            );
            DEFAULT_DELIMITER
        }),
    };
    log::debug!("Reading {} with delimiter {:?}", path.display(), delimiter as char);

    let mut reader = ::csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(source.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ReaderError::decode(path, e.to_string()))?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    if !options.has_header {
        return Ok(Table::Rows(rows));
    }

    let mut rows = rows.into_iter();
    let columns = rows.next().unwrap_or_default();

    let missing: Vec<String> = options
        .required_columns
        .iter()
        .filter(|column| !columns.contains(column))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(ReaderError::MissingRequiredColumns {
            path: path.to_path_buf(),
            columns: missing,
        });
    }

    let records = rows
        .map(|row| {
            let mut fields = row.into_iter();
            columns
                .iter()
                .map(|column| (column.clone(), fields.next().unwrap_or_default()))
                .collect::<BTreeMap<_, _>>()
        })
        .collect();

    Ok(Table::Records { columns, records })
}

/// Leading slice of `source` used for detection, cut on a char boundary
fn sample(source: &str) -> &str {
    if source.len() <= SNIFF_BYTES {
        return source;
    }
    let mut end = SNIFF_BYTES;
    while !source.is_char_boundary(end) {
        end -= 1;
    }
    &source[..end]
}

/// Detect the field delimiter of a CSV sample
pub fn sniff_delimiter(sample: &str) -> Option<u8> {
    let mut lines: Vec<&str> = sample.lines().collect();
    // A full-size sample usually ends mid-line
    if sample.len() >= SNIFF_BYTES && !sample.ends_with('\n') {
        lines.pop();
    }
    lines.retain(|line| !line.trim().is_empty());
    if lines.is_empty() {
        return None;
    }

    let mut best: Option<(u8, usize)> = None;
    for candidate in CANDIDATES {
        let first = count_unquoted(lines[0], candidate);
        if first == 0 {
            continue;
        }
        if !lines[1..]
            .iter()
            .all(|line| count_unquoted(line, candidate) == first)
        {
            continue;
        }
        match best {
            Some((_, count)) if count >= first => {}
            _ => best = Some((candidate, first)),
        }
    }

    best.map(|(delimiter, _)| delimiter)
}

fn count_unquoted(line: &str, delimiter: u8) -> usize {
    let mut in_quotes = false;
    let mut count = 0;
    for byte in line.bytes() {
        if byte == b'"' {
            in_quotes = !in_quotes;
        } else if byte == delimiter && !in_quotes {
            count += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_sniff_semicolon() {
        assert_eq!(sniff_delimiter("a;b;c\n1;2;3\n"), Some(b';'));
    }

    #[test]
    fn test_sniff_ignores_quoted_delimiters() {
        let sample = "name,notes\n\"Smith; J\",ok\n\"Doe; A\",fine\n";
        assert_eq!(sniff_delimiter(sample), Some(b','));
    }

    #[test]
    fn test_sniff_prefers_most_frequent_consistent_candidate() {
        // ':' appears once per line, '\t' twice
        let sample = "a\tb:x\tc\n1\t2:y\t3\n";
        assert_eq!(sniff_delimiter(sample), Some(b'\t'));
    }

    #[test]
    fn test_sniff_fails_on_single_column() {
        assert_eq!(sniff_delimiter("alpha\nbeta\n"), None);
    }

    #[test]
    fn test_parse_records_with_detected_delimiter() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "people.csv", "name|age\nada|36\ngrace|45\n");

        let table = parse(&path, &CsvOptions::default()).unwrap();
        match table {
            Table::Records { columns, records } => {
                assert_eq!(columns, vec!["name", "age"]);
                assert_eq!(records.len(), 2);
                assert_eq!(records[1]["name"], "grace");
                assert_eq!(records[1]["age"], "45");
            }
            other => panic!("expected records, got {:?}", other),
        }
    }

    #[test]
    fn test_short_rows_fill_missing_columns() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "short.csv", "a,b,c\n1,2\n");

        let table = parse(&path, &CsvOptions::default()).unwrap();
        let Table::Records { records, .. } = table else {
            panic!("expected records");
        };
        assert_eq!(records[0]["b"], "2");
        assert_eq!(records[0]["c"], "");
    }

    #[test]
    fn test_headerless_rows() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "plain.csv", "1,2\n3,4\n");

        let options = CsvOptions {
            has_header: false,
            ..CsvOptions::default()
        };
        let table = parse(&path, &options).unwrap();
        assert_eq!(
            table,
            Table::Rows(vec![vec!["1".into(), "2".into()], vec!["3".into(), "4".into()]])
        );
    }

    #[test]
    fn test_headerless_blank_lines_skipped() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "gaps.csv", "1,2\n\n3,4\n\n");

        let options = CsvOptions {
            has_header: false,
            delimiter: Some(b','),
            ..CsvOptions::default()
        };
        let table = parse(&path, &options).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table,
            Table::Rows(vec![vec!["1".into(), "2".into()], vec!["3".into(), "4".into()]])
        );
    }

    #[test]
    fn test_missing_required_columns() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "cols.csv", "id,name\n1,x\n");

        let options = CsvOptions {
            required_columns: vec!["id".into(), "email".into(), "phone".into()],
            ..CsvOptions::default()
        };
        let err = parse(&path, &options).unwrap_err();
        match err {
            ReaderError::MissingRequiredColumns { columns, .. } => {
                assert_eq!(columns, vec!["email", "phone"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_explicit_delimiter_wins() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "odd.csv", "a;b,c\n1;2,3\n");

        let options = CsvOptions {
            has_header: false,
            delimiter: Some(b';'),
            ..CsvOptions::default()
        };
        let table = parse(&path, &options).unwrap();
        assert_eq!(
            table,
            Table::Rows(vec![
                vec!["a".into(), "b,c".into()],
                vec!["1".into(), "2,3".into()]
            ])
        );
    }
}
