//! Format decoders for resolved files
//!
//! Each format has its own submodule exposing a decode function that takes a
//! path and returns structured content. The resolver only ever calls
//! [`DecoderFactory::decode`] with the [`FileKind`] picked from the extension.

pub mod json;
pub mod keyvalue;
pub mod sql;
pub mod tabular;
pub mod text;

use std::path::Path;

use crate::error::{ReaderError, Result};
use crate::models::{Content, FileKind};

pub use self::tabular::CsvOptions;

/// Decoder factory that selects the appropriate decoder based on file kind
pub struct DecoderFactory;

impl DecoderFactory {
    /// Decode a file into [`Content`] according to `kind`
    pub fn decode(path: &Path, kind: FileKind) -> Result<Content> {
        log::debug!("Decoding {} as {}", path.display(), kind);
        match kind {
            FileKind::KeyValue => keyvalue::parse(path).map(Content::KeyValue),
            FileKind::Json => json::parse(path).map(Content::Json),
            FileKind::Sql => sql::parse(path).map(Content::Sql),
            FileKind::Csv => tabular::parse(path, &CsvOptions::default()).map(Content::Table),
            FileKind::Raw => text::read_lossy(path).map(Content::Text),
        }
    }
}

/// Decode `path` as `kind`
pub fn parse(path: &Path, kind: FileKind) -> Result<Content> {
    DecoderFactory::decode(path, kind)
}

/// Read a file as strict UTF-8, mapping a missing file to [`ReaderError::FileNotFound`]
pub(crate) fn read_utf8(path: &Path) -> Result<String> {
    let bytes = read_bytes(path)?;
    String::from_utf8(bytes)
        .map_err(|e| ReaderError::decode(path, format!("invalid UTF-8: {}", e.utf8_error())))
}

pub(crate) fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ReaderError::FileNotFound(path.to_path_buf()),
        _ => ReaderError::io(path, e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_factory_dispatches_by_kind() {
        let temp = TempDir::new().unwrap();
        let sql = temp.path().join("init.sql");
        std::fs::write(&sql, "SELECT 1;\n").unwrap();

        let content = DecoderFactory::decode(&sql, FileKind::Sql).unwrap();
        assert_eq!(content.as_statements(), Some(&["SELECT 1;".to_string()][..]));

        let raw = DecoderFactory::decode(&sql, FileKind::Raw).unwrap();
        assert_eq!(raw.as_text(), Some("SELECT 1;\n"));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = parse(&temp.path().join("absent.json"), FileKind::Json).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_strict_read_rejects_invalid_utf8() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.conf");
        std::fs::write(&path, [b'k', b'=', 0xff, b'\n']).unwrap();

        let err = read_utf8(&path).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Decode);
    }
}
