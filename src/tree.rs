//! Filename index over a directory tree
//!
//! A single recursive walk collects every non-directory entry below the root
//! and groups relative paths by base filename. Each group is ordered by
//! (depth, relative path), so the first candidate is always the shallowest,
//! then lexicographically smallest, location of that filename. Lookups rely
//! on this order to stop at the first acceptable candidate.

use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use walkdir::WalkDir;

use crate::error::{ReaderError, Result};
use crate::paths;

/// Mapping from base filename to every relative path holding that filename
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeIndex {
    entries: HashMap<String, Vec<String>>,
    file_count: usize,
}

impl TreeIndex {
    /// Walk `root` once and build the index
    ///
    /// Fails with [`ReaderError::InvalidRoot`] if `root` is empty or missing.
    /// A root that is a regular file yields an empty index. Entries that
    /// cannot be read are skipped with a warning.
    /// Symlinked directories are not descended into; symlinks to files are
    /// indexed like regular files.
    pub fn scan(root: &Path) -> Result<Self> {
        if root.as_os_str().is_empty() || !root.exists() {
            return Err(ReaderError::InvalidRoot(root.to_path_buf()));
        }

        log::info!("Scanning tree: {:?}", root);
        let started = Instant::now();

        let walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        let mut relative_paths = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }
            if entry.path_is_symlink() && entry.path().is_dir() {
                log::debug!("Not following directory symlink {}", entry.path().display());
                continue;
            }

            match paths::relative_components(root, entry.path()) {
                Some(relative) => relative_paths.push(relative),
                None => log::warn!("Skipping non UTF-8 path {}", entry.path().display()),
            }
        }

        let index = Self::from_relative_paths(relative_paths);
        log::info!(
            "Indexed {} files ({} distinct names) in {:?}",
            index.file_count,
            index.entries.len(),
            started.elapsed()
        );
        Ok(index)
    }

    /// Build an index from `/`-separated paths relative to some root
    pub fn from_relative_paths<I, S>(relative_paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: HashMap<String, Vec<String>> = HashMap::new();
        let mut file_count = 0;

        for relative in relative_paths {
            let relative = paths::normalize_relative(relative.as_ref());
            let (_, name) = paths::split_name(&relative);
            if name.is_empty() {
                continue;
            }
            entries
                .entry(name.to_string())
                .or_default()
                .push(relative);
            file_count += 1;
        }

        for candidates in entries.values_mut() {
            candidates.sort_by(|a, b| {
                paths::depth(a)
                    .cmp(&paths::depth(b))
                    .then_with(|| a.cmp(b))
            });
        }

        Self {
            entries,
            file_count,
        }
    }

    /// Ordered candidates for a base filename
    pub fn candidates(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// Number of distinct filenames
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of indexed files
    pub fn file_count(&self) -> usize {
        self.file_count
    }

    /// Entries sorted by filename
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        let mut names: Vec<&String> = self.entries.keys().collect();
        names.sort();
        names
            .into_iter()
            .map(move |name| (name.as_str(), self.entries[name].as_slice()))
    }
}
