//! Shared caches for parsed configurations and tree indexes
//!
//! Two independent maps, each behind its own lock:
//! - configurations keyed by (path as given, [`ConfKind`]) and gated by the
//!   file's modification time
//! - tree indexes keyed by absolute root, only removed by explicit invalidation
//!
//! A lock is held for the whole check-or-populate sequence, so two callers
//! never build the same entry concurrently. Failed loads leave the map as it
//! was.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::time::SystemTime;

use crate::config;
use crate::error::{ReaderError, Result};
use crate::models::{ConfKind, ParsedConfig};
use crate::paths;
use crate::tree::TreeIndex;

static GLOBAL: OnceLock<Arc<ReaderCache>> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ConfigKey {
    path: PathBuf,
    kind: ConfKind,
}

#[derive(Debug)]
struct ConfigEntry {
    mtime: SystemTime,
    config: Arc<ParsedConfig>,
}

/// Selects which cache entries [`ReaderCache::invalidate`] drops
///
/// With neither field set, both caches are cleared entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invalidation {
    /// Drop every configuration entry loaded from this path, whatever its kind
    pub config_path: Option<PathBuf>,
    /// Drop the tree index for this root (made absolute before matching)
    pub root: Option<PathBuf>,
}

impl Invalidation {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn config(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: Some(path.into()),
            root: None,
        }
    }

    pub fn root(root: impl Into<PathBuf>) -> Self {
        Self {
            config_path: None,
            root: Some(root.into()),
        }
    }
}

/// Configuration and tree caches shared between readers
#[derive(Debug, Default)]
pub struct ReaderCache {
    configs: Mutex<HashMap<ConfigKey, ConfigEntry>>,
    trees: Mutex<HashMap<PathBuf, Arc<TreeIndex>>>,
}

impl ReaderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide cache, created on first use
    pub fn global() -> Arc<ReaderCache> {
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(ReaderCache::new())))
    }

    /// Return the parsed configuration at `path`, reloading it if its mtime changed
    ///
    /// Required keys are checked only when the file is (re)parsed; a cache hit
    /// returns the stored parse unchanged.
    pub fn get_config(
        &self,
        path: &Path,
        kind: ConfKind,
        required_keys: &[String],
    ) -> Result<Arc<ParsedConfig>> {
        let mtime = modified(path)?;
        let key = ConfigKey {
            path: path.to_path_buf(),
            kind,
        };

        let mut configs = self.configs.lock();
        if let Some(entry) = configs.get(&key) {
            if entry.mtime == mtime {
                log::debug!("Config cache hit: {} ({})", path.display(), kind);
                return Ok(Arc::clone(&entry.config));
            }
            log::info!("Config changed on disk, reloading: {}", path.display());
        } else {
            log::debug!("Config cache miss: {} ({})", path.display(), kind);
        }

        let loaded = Arc::new(config::load_config(path, kind, required_keys)?);
        configs.insert(
            key,
            ConfigEntry {
                mtime,
                config: Arc::clone(&loaded),
            },
        );
        Ok(loaded)
    }

    /// Return the tree index for `root`, scanning it on first request
    pub fn get_tree(&self, root: &Path) -> Result<Arc<TreeIndex>> {
        let root = paths::absolutize(root)?;

        let mut trees = self.trees.lock();
        if let Some(tree) = trees.get(&root) {
            log::debug!("Tree cache hit: {}", root.display());
            return Ok(Arc::clone(tree));
        }

        let tree = Arc::new(TreeIndex::scan(&root)?);
        trees.insert(root, Arc::clone(&tree));
        Ok(tree)
    }

    /// Drop cache entries selected by `what`
    pub fn invalidate(&self, what: &Invalidation) -> Result<()> {
        if what.config_path.is_none() && what.root.is_none() {
            log::debug!("Clearing all cached configs and trees");
            self.configs.lock().clear();
            self.trees.lock().clear();
            return Ok(());
        }

        if let Some(path) = &what.config_path {
            let mut configs = self.configs.lock();
            let before = configs.len();
            configs.retain(|key, _| key.path != *path);
            log::debug!(
                "Dropped {} cached config(s) for {}",
                before - configs.len(),
                path.display()
            );
        }

        if let Some(root) = &what.root {
            let root = paths::absolutize(root)?;
            if self.trees.lock().remove(&root).is_some() {
                log::debug!("Dropped cached tree for {}", root.display());
            }
        }

        Ok(())
    }

    /// Number of cached configuration entries
    pub fn config_count(&self) -> usize {
        self.configs.lock().len()
    }

    /// Number of cached tree indexes
    pub fn tree_count(&self) -> usize {
        self.trees.lock().len()
    }

    pub fn has_tree(&self, root: &Path) -> bool {
        match paths::absolutize(root) {
            Ok(root) => self.trees.lock().contains_key(&root),
            Err(_) => false,
        }
    }
}

fn modified(path: &Path) -> Result<SystemTime> {
    let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ReaderError::FileNotFound(path.to_path_buf()),
        _ => ReaderError::io(path, e),
    })?;
    metadata.modified().map_err(|e| ReaderError::io(path, e))
}
