//! treeconf: locate and load configuration-like files beneath a root
//!
//! A bootstrap config names a root directory. The root is indexed once by
//! filename, and lookups pick exactly one file per name using a fixed
//! (depth, path) priority, optionally narrowed to a subdirectory. The file is
//! then decoded according to its extension.
//!
//! # Architecture
//!
//! - **Decoders**: key-value, JSON, SQL, CSV and raw text
//! - **Tree index**: filename to ordered relative paths, built in one walk
//! - **Resolver**: scoped first-match selection over the index
//! - **Cache**: mtime-gated configs and explicitly invalidated tree indexes
//! - **Reader**: the facade tying these together
//!
//! # Example Usage
//!
//! ```no_run
//! use treeconf::FileConfigReader;
//!
//! let reader = FileConfigReader::open("config.conf").unwrap();
//! let settings = reader.find("settings.json", Some("services/api")).unwrap();
//!
//! println!("{:?}", settings.as_json());
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod decoders;
pub mod error;
pub mod models;
pub mod output;
pub mod paths;
pub mod reader;
pub mod resolver;
pub mod tree;

// Re-export commonly used types
pub use cache::{Invalidation, ReaderCache};
pub use decoders::CsvOptions;
pub use error::{ErrorKind, ReaderError, Result};
pub use models::{ConfKind, Content, FileKind, ParsedConfig, Table};
pub use reader::{FileConfigReader, ReaderOptions};
pub use tree::TreeIndex;
