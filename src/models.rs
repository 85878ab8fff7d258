//! Core data models for treeconf
//!
//! These types describe what a caller asks for (a configuration kind) and
//! what comes back from a lookup (decoded file content).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;
use strum::Display;

use crate::error::ReaderError;

/// Declared format of a configuration file loaded through the cache
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ConfKind {
    #[default]
    KeyValue,
    Json,
}

impl FromStr for ConfKind {
    type Err = ReaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "key-value" | "keyvalue" | "key_value" | "kv" | "conf" => Ok(ConfKind::KeyValue),
            "json" => Ok(ConfKind::Json),
            other => Err(ReaderError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Decoder selected for a resolved file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FileKind {
    KeyValue,
    Json,
    Sql,
    Csv,
    Raw,
}

impl FileKind {
    /// Pick a decoder from a file extension (case-insensitive, without the dot)
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "json" => FileKind::Json,
            "conf" => FileKind::KeyValue,
            "sql" => FileKind::Sql,
            "csv" => FileKind::Csv,
            _ => FileKind::Raw,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .map(|ext| Self::from_extension(&ext.to_string_lossy()))
            .unwrap_or(FileKind::Raw)
    }
}

impl FromStr for FileKind {
    type Err = ReaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "key-value" | "keyvalue" | "kv" | "conf" => Ok(FileKind::KeyValue),
            "json" => Ok(FileKind::Json),
            "sql" => Ok(FileKind::Sql),
            "csv" => Ok(FileKind::Csv),
            "raw" | "text" | "txt" => Ok(FileKind::Raw),
            other => Err(ReaderError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Rows decoded from a CSV file
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Table {
    /// Header mode: every row maps column name to field
    Records {
        columns: Vec<String>,
        records: Vec<BTreeMap<String, String>>,
    },
    /// Headerless mode: plain ordered fields
    Rows(Vec<Vec<String>>),
}

impl Table {
    pub fn len(&self) -> usize {
        match self {
            Table::Records { records, .. } => records.len(),
            Table::Rows(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Content returned by a lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Content {
    KeyValue(BTreeMap<String, String>),
    Json(serde_json::Value),
    Sql(Vec<String>),
    Table(Table),
    Text(String),
}

impl Content {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_key_value(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Content::KeyValue(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Content::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_statements(&self) -> Option<&[String]> {
        match self {
            Content::Sql(statements) => Some(statements),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Content::Table(table) => Some(table),
            _ => None,
        }
    }
}

/// A loaded configuration file
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParsedConfig {
    KeyValue(BTreeMap<String, String>),
    Json(serde_json::Map<String, serde_json::Value>),
}

impl ParsedConfig {
    pub fn kind(&self) -> ConfKind {
        match self {
            ParsedConfig::KeyValue(_) => ConfKind::KeyValue,
            ParsedConfig::Json(_) => ConfKind::Json,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        match self {
            ParsedConfig::KeyValue(map) => map.contains_key(key),
            ParsedConfig::Json(map) => map.contains_key(key),
        }
    }

    /// String value for `key`; JSON values that are not strings yield `None`
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self {
            ParsedConfig::KeyValue(map) => map.get(key).map(String::as_str),
            ParsedConfig::Json(map) => map.get(key).and_then(serde_json::Value::as_str),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ParsedConfig::KeyValue(map) => map.len(),
            ParsedConfig::Json(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys from `required` that this config lacks, in the order given
    pub fn missing_keys(&self, required: &[String]) -> Vec<String> {
        required
            .iter()
            .filter(|key| !self.contains_key(key))
            .cloned()
            .collect()
    }
}
