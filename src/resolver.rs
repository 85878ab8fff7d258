//! Deterministic single-result lookup over a [`TreeIndex`]
//!
//! A name such as `"sub/dir/foo.json"` is split into the base filename
//! `foo.json` and the hint `sub/dir`. The hint is appended to the caller's
//! start directory to form the scope. Without a scope the first candidate
//! wins; with one, candidates are walked in index order and the first path
//! inside the scope is returned. The index order already encodes
//! (depth, path) priority, so no further sorting happens here.

use std::path::{Path, PathBuf};

use crate::decoders::DecoderFactory;
use crate::error::{ReaderError, Result};
use crate::models::{Content, FileKind};
use crate::paths;
use crate::tree::TreeIndex;

/// A name split into base filename and effective scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub base: String,
    /// Root-relative scope; empty means the whole root
    pub scope: String,
}

impl Lookup {
    pub fn new(name: &str, start: Option<&str>) -> Result<Self> {
        if name.is_empty() {
            return Err(ReaderError::InvalidArgument("name must be provided".to_string()));
        }

        let normalized = paths::normalize_relative(name);
        let (hint, base) = paths::split_name(&normalized);
        if base.is_empty() || base == ".." {
            return Err(ReaderError::InvalidArgument(format!(
                "'{name}' does not name a file"
            )));
        }

        let scope = paths::join_relative(start.unwrap_or_default(), hint);
        Ok(Self {
            base: base.to_string(),
            scope,
        })
    }

    pub fn is_scoped(&self) -> bool {
        !self.scope.is_empty()
    }
}

/// Pick the relative path `name` resolves to under `root`
pub fn resolve<'a>(
    tree: &'a TreeIndex,
    root: &Path,
    name: &str,
    start: Option<&str>,
) -> Result<&'a str> {
    let lookup = Lookup::new(name, start)?;

    let candidates = tree
        .candidates(&lookup.base)
        .filter(|candidates| !candidates.is_empty())
        .ok_or_else(|| ReaderError::NotFoundUnderRoot {
            name: name.to_string(),
            root: root.to_path_buf(),
        })?;

    if !lookup.is_scoped() {
        return Ok(candidates[0].as_str());
    }

    candidates
        .iter()
        .find(|candidate| paths::in_scope(candidate, &lookup.scope))
        .map(String::as_str)
        .ok_or_else(|| ReaderError::NotFoundUnderScope {
            name: name.to_string(),
            scope: lookup.scope.clone(),
            root: root.to_path_buf(),
        })
}

/// Absolute path of the file `name` resolves to
pub fn locate(tree: &TreeIndex, root: &Path, name: &str, start: Option<&str>) -> Result<PathBuf> {
    let relative = resolve(tree, root, name, start)?;
    Ok(root.join(relative))
}

/// Resolve `name` and decode the selected file
///
/// With `parse_known_types` the extension picks the decoder; otherwise, and
/// for unknown extensions, the file comes back as lossily decoded text.
pub fn find(
    tree: &TreeIndex,
    root: &Path,
    name: &str,
    start: Option<&str>,
    parse_known_types: bool,
) -> Result<Content> {
    let path = locate(tree, root, name, start)?;
    let kind = if parse_known_types {
        FileKind::from_path(&path)
    } else {
        FileKind::Raw
    };
    log::debug!("Resolved '{}' to {}", name, path.display());
    DecoderFactory::decode(&path, kind)
}
