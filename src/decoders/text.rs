//! Raw text reads
//!
//! Undecodable bytes are replaced with U+FFFD instead of failing the read, so
//! any file can be returned as text.

use std::path::Path;

use crate::error::Result;

pub fn read_lossy(path: &Path) -> Result<String> {
    let bytes = super::read_bytes(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            log::debug!("Replacing invalid UTF-8 in {}", path.display());
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_invalid_bytes_are_replaced() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("blob.bin");
        std::fs::write(&path, [b'o', b'k', 0xff, b'!']).unwrap();

        assert_eq!(read_lossy(&path).unwrap(), "ok\u{FFFD}!");
    }
}
