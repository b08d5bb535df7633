//! Local tree enumeration for sync
//!
//! Turns a site directory into the list of (file, key) pairs to upload.
//! Keys are relative to the root and always use `/` separators.

use std::io;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::content_type;
use crate::error::{Error, Result};

/// A local file paired with the object key it is uploaded to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncUnit {
    /// Path of the local file under the sync root
    pub path: PathBuf,

    /// Target object key
    pub key: String,

    /// File size when the tree was walked
    pub size: u64,
}

impl SyncUnit {
    /// Build a unit for `path`, keyed relative to `root`
    pub fn new(root: &Path, path: PathBuf, size: u64) -> Result<Self> {
        let key = object_key(root, &path)?;
        Ok(Self { path, key, size })
    }

    /// Content type the unit is uploaded with
    pub fn content_type(&self) -> String {
        content_type::resolve(&self.key)
    }
}

/// Result of a completed sync
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    /// Units uploaded, in upload order
    pub uploaded: Vec<SyncUnit>,

    /// Total bytes sent
    pub total_bytes: u64,
}

/// Expand a leading `~` and resolve `root` to an absolute directory.
pub fn resolve_root(root: &Path) -> Result<PathBuf> {
    let expanded = expand_home(root);

    let resolved = std::fs::canonicalize(&expanded)
        .map_err(|_| Error::PathNotFound(root.display().to_string()))?;

    if !resolved.is_dir() {
        return Err(Error::PathNotFound(format!(
            "{} is not a directory",
            root.display()
        )));
    }

    Ok(resolved)
}

fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

/// Enumerate every regular file under `root`, sorted by key.
///
/// `root` must already be resolved. Symlinks are followed. A directory link
/// that points back at one of its own ancestors is skipped. Empty
/// directories contribute nothing.
pub fn collect_units(root: &Path) -> Result<Vec<SyncUnit>> {
    let mut units = Vec::new();
    // (directory, canonical paths of the directories above it)
    let mut pending: Vec<(PathBuf, Vec<PathBuf>)> = vec![(root.to_path_buf(), Vec::new())];

    while let Some((dir, mut ancestors)) = pending.pop() {
        let real = std::fs::canonicalize(&dir).map_err(|e| Error::local_io(&dir, e))?;
        if ancestors.contains(&real) {
            tracing::debug!("Skipping {}: symlink loop", dir.display());
            continue;
        }
        ancestors.push(real);

        let entries = std::fs::read_dir(&dir).map_err(|e| Error::local_io(&dir, e))?;
        for entry in entries {
            let path = entry.map_err(|e| Error::local_io(&dir, e))?.path();

            let metadata = match std::fs::metadata(&path) {
                Ok(metadata) => metadata,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    tracing::debug!("Skipping {}: dangling symlink", path.display());
                    continue;
                }
                Err(e) => return Err(Error::local_io(&path, e)),
            };

            if metadata.is_dir() {
                pending.push((path, ancestors.clone()));
            } else if metadata.is_file() {
                units.push(SyncUnit::new(root, path, metadata.len())?);
            } else {
                tracing::debug!("Skipping {}: not a regular file", path.display());
            }
        }
    }

    units.sort_by(|a, b| a.key.cmp(&b.key));
    Ok(units)
}

/// Object key for `path` relative to `root`
fn object_key(root: &Path, path: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| Error::PathNotFound(format!("{} is outside the sync root", path.display())))?;

    let mut parts = Vec::new();
    for component in relative.components() {
        if let Component::Normal(part) = component {
            let part = part
                .to_str()
                .ok_or_else(|| Error::InvalidFileName(path.display().to_string()))?;
            parts.push(part);
        }
    }

    Ok(parts.join("/"))
}
