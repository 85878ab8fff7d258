//! Configuration loading with required-key validation
//!
//! A configuration file is either `key=value` text or a JSON object. Loading
//! always reads from disk; the mtime-gated reuse lives in [`crate::cache`].

use std::path::Path;

use crate::decoders::{json, keyvalue};
use crate::error::{ReaderError, Result};
use crate::models::{ConfKind, ParsedConfig};

/// Load a configuration file of the declared kind and check `required_keys`
pub fn load_config(path: &Path, kind: ConfKind, required_keys: &[String]) -> Result<ParsedConfig> {
    if !path.exists() {
        return Err(ReaderError::FileNotFound(path.to_path_buf()));
    }

    let config = match kind {
        ConfKind::KeyValue => ParsedConfig::KeyValue(keyvalue::parse(path)?),
        ConfKind::Json => ParsedConfig::Json(json::parse_object(path)?),
    };
    log::debug!(
        "Loaded {} configuration {} ({} keys)",
        kind,
        path.display(),
        config.len()
    );

    check_required(path, &config, required_keys)?;
    Ok(config)
}

/// Load a JSON configuration object and check `required_keys`
pub fn load_json(
    path: &Path,
    required_keys: &[String],
) -> Result<serde_json::Map<String, serde_json::Value>> {
    if !path.exists() {
        return Err(ReaderError::FileNotFound(path.to_path_buf()));
    }

    let map = json::parse_object(path)?;
    require(path, required_keys, |key| map.contains_key(key))?;
    Ok(map)
}

/// Fail with [`ReaderError::MissingRequiredKeys`] naming every absent key
pub fn check_required(path: &Path, config: &ParsedConfig, required_keys: &[String]) -> Result<()> {
    require(path, required_keys, |key| config.contains_key(key))
}

fn require(path: &Path, required_keys: &[String], present: impl Fn(&str) -> bool) -> Result<()> {
    let missing: Vec<String> = required_keys
        .iter()
        .filter(|key| !present(key.as_str()))
        .cloned()
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ReaderError::MissingRequiredKeys {
            path: path.to_path_buf(),
            keys: missing,
        })
    }
}
