//! Reader facade: bootstrap config, root, and tree index in one handle
//!
//! Construction loads the bootstrap configuration through the shared cache,
//! reads its mandatory `root` key, and fetches the tree index for that root.
//! After that the reader is a read-only view; `find` never rescans the disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cache::{Invalidation, ReaderCache};
use crate::config;
use crate::decoders::{self, CsvOptions};
use crate::error::{ReaderError, Result};
use crate::models::{ConfKind, Content, FileKind, ParsedConfig, Table};
use crate::paths;
use crate::resolver;
use crate::tree::TreeIndex;

/// Key in the bootstrap configuration naming the search root
pub const ROOT_KEY: &str = "root";

/// Options for constructing a [`FileConfigReader`]
#[derive(Debug, Clone, Default)]
pub struct ReaderOptions {
    /// Format of the bootstrap configuration
    pub kind: ConfKind,
    /// Keys the bootstrap configuration must define (besides `root`)
    pub required_keys: Vec<String>,
    /// Drop cached entries for the config path before loading
    pub force_refresh: bool,
}

/// Locates and loads files beneath the root named by a bootstrap config
#[derive(Debug, Clone)]
pub struct FileConfigReader {
    cache: Arc<ReaderCache>,
    config: Arc<ParsedConfig>,
    root: PathBuf,
    tree: Arc<TreeIndex>,
}

impl FileConfigReader {
    /// Open a key-value bootstrap config using the process-wide cache
    pub fn open(config_path: impl AsRef<Path>) -> Result<Self> {
        Self::with_cache(ReaderCache::global(), config_path, ReaderOptions::default())
    }

    /// Open a bootstrap config with explicit options using the process-wide cache
    pub fn with_options(config_path: impl AsRef<Path>, options: ReaderOptions) -> Result<Self> {
        Self::with_cache(ReaderCache::global(), config_path, options)
    }

    /// Open a bootstrap config against a caller-owned cache
    pub fn with_cache(
        cache: Arc<ReaderCache>,
        config_path: impl AsRef<Path>,
        options: ReaderOptions,
    ) -> Result<Self> {
        let config_path = config_path.as_ref();

        if options.force_refresh {
            cache.invalidate(&Invalidation::config(config_path))?;
        }

        let config = cache.get_config(config_path, options.kind, &options.required_keys)?;
        let root = match config.get_str(ROOT_KEY) {
            Some(root) if !root.is_empty() => paths::absolutize(Path::new(root))?,
            _ => return Err(ReaderError::MissingRoot(config_path.to_path_buf())),
        };
        let tree = cache.get_tree(&root)?;

        log::info!(
            "Reader ready: config={} root={} ({} files)",
            config_path.display(),
            root.display(),
            tree.file_count()
        );

        Ok(Self {
            cache,
            config,
            root,
            tree,
        })
    }

    /// Find `name` beneath the root (optionally under `start`) and decode it by extension
    pub fn find(&self, name: &str, start: Option<&str>) -> Result<Content> {
        self.find_with(name, start, true)
    }

    /// Find `name`; with `parse_known_types` off the file is always returned as text
    pub fn find_with(
        &self,
        name: &str,
        start: Option<&str>,
        parse_known_types: bool,
    ) -> Result<Content> {
        resolver::find(&self.tree, &self.root, name, start, parse_known_types)
    }

    /// Absolute path `name` resolves to, without reading it
    pub fn locate(&self, name: &str, start: Option<&str>) -> Result<PathBuf> {
        resolver::locate(&self.tree, &self.root, name, start)
    }

    /// The bootstrap configuration
    pub fn config(&self) -> &ParsedConfig {
        &self.config
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tree(&self) -> &TreeIndex {
        &self.tree
    }

    /// The cache this reader was built from
    pub fn cache(&self) -> &Arc<ReaderCache> {
        &self.cache
    }

    /// Drop entries from the process-wide cache
    pub fn invalidate_caches(config_path: Option<&Path>, root: Option<&Path>) -> Result<()> {
        ReaderCache::global().invalidate(&Invalidation {
            config_path: config_path.map(Path::to_path_buf),
            root: root.map(Path::to_path_buf),
        })
    }

    pub fn load_config(
        path: &Path,
        kind: ConfKind,
        required_keys: &[String],
    ) -> Result<ParsedConfig> {
        config::load_config(path, kind, required_keys)
    }

    pub fn load_json(
        path: &Path,
        required_keys: &[String],
    ) -> Result<serde_json::Map<String, serde_json::Value>> {
        config::load_json(path, required_keys)
    }

    pub fn load_sql(path: &Path) -> Result<Vec<String>> {
        decoders::sql::parse(path)
    }

    pub fn load_csv(path: &Path, options: &CsvOptions) -> Result<Table> {
        decoders::tabular::parse(path, options)
    }

    pub fn load_text(path: &Path) -> Result<String> {
        decoders::text::read_lossy(path)
    }

    /// Decode any file as `kind`
    pub fn decode(path: &Path, kind: FileKind) -> Result<Content> {
        decoders::parse(path, kind)
    }
}
