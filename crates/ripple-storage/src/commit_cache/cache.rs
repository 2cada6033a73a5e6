//! CommitCache — load, store, inspect, and clear cached commit impacts.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ripple_core::errors::StorageError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::types::{format_fingerprint, CacheDocument, CacheInfo};

/// Characters of the commit id used as the entry directory name.
pub const SHORT_HASH_LEN: usize = 7;

pub const CACHE_FILE_NAME: &str = "impact.json";

/// A cache directory bound to one analysis-config fingerprint.
///
/// Entries written under another fingerprint, or for another commit that
/// shares the short hash, read as misses and are overwritten on the next
/// store. Distinct commits write distinct directories, so no locking.
#[derive(Debug, Clone)]
pub struct CommitCache {
    root: PathBuf,
    fingerprint: u64,
}

impl CommitCache {
    /// Open (and create if needed) the cache at `root`.
    pub fn open(root: impl Into<PathBuf>, fingerprint: u64) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| io_error(&root, e))?;
        Ok(Self { root, fingerprint })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// `<root>/<short hash>/impact.json`.
    pub fn entry_path(&self, commit: &str) -> PathBuf {
        self.root.join(short_hash(commit)).join(CACHE_FILE_NAME)
    }

    /// The cached impact for `commit`, or `None` on a miss. Corrupt,
    /// stale, and colliding entries are misses, not errors.
    pub fn load<T: DeserializeOwned>(&self, commit: &str) -> Result<Option<T>, StorageError> {
        let path = self.entry_path(commit);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(commit, "cache miss");
                return Ok(None);
            }
            Err(e) => return Err(io_error(&path, e)),
        };

        let document: CacheDocument<T> = match serde_json::from_slice(&bytes) {
            Ok(document) => document,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring corrupt cache entry");
                return Ok(None);
            }
        };

        if document.commit != commit {
            warn!(
                commit,
                cached = %document.commit,
                "short hash collision; recomputing"
            );
            return Ok(None);
        }
        if document.fingerprint != format_fingerprint(self.fingerprint) {
            warn!(
                commit,
                cached = %document.fingerprint,
                current = %format_fingerprint(self.fingerprint),
                "cache entry produced under another config; recomputing"
            );
            return Ok(None);
        }

        debug!(commit, "cache hit");
        Ok(Some(document.impact))
    }

    /// Write `impact` for `commit`, replacing any existing entry.
    /// Goes through a temp file and a rename so readers never see a
    /// partial document.
    pub fn store<T: Serialize>(&self, commit: &str, impact: &T) -> Result<PathBuf, StorageError> {
        let path = self.entry_path(commit);
        let dir = self.root.join(short_hash(commit));
        fs::create_dir_all(&dir).map_err(|e| io_error(&dir, e))?;

        let document = CacheDocument::new(self.fingerprint, commit, impact);
        let mut bytes = serde_json::to_vec_pretty(&document).map_err(|e| StorageError::Serialize {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        bytes.push(b'\n');

        let tmp_path = dir.join(format!(".{CACHE_FILE_NAME}.{}.tmp", std::process::id()));
        fs::write(&tmp_path, &bytes).map_err(|e| io_error(&tmp_path, e))?;
        if let Err(e) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(io_error(&path, e));
        }

        debug!(commit, path = %path.display(), bytes = bytes.len(), "cached commit impact");
        Ok(path)
    }

    /// Number of entries and their total size. Ignores anything that is
    /// not an entry directory.
    pub fn info(&self) -> Result<CacheInfo, StorageError> {
        let mut info = CacheInfo::default();
        for file in self.entry_files()? {
            let meta = fs::metadata(&file).map_err(|e| io_error(&file, e))?;
            info.entries += 1;
            info.total_bytes += meta.len();
        }
        Ok(info)
    }

    /// Delete every entry directory. Returns how many were removed.
    pub fn clear(&self) -> Result<usize, StorageError> {
        let mut removed = 0;
        for file in self.entry_files()? {
            if let Some(dir) = file.parent() {
                fs::remove_dir_all(dir).map_err(|e| io_error(dir, e))?;
                removed += 1;
            }
        }
        debug!(root = %self.root.display(), removed, "cache cleared");
        Ok(removed)
    }

    fn entry_files(&self) -> Result<Vec<PathBuf>, StorageError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(&self.root, e)),
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_error(&self.root, e))?;
            let file = entry.path().join(CACHE_FILE_NAME);
            if entry.path().is_dir() && file.is_file() {
                files.push(file);
            }
        }
        files.sort();
        Ok(files)
    }
}

fn short_hash(commit: &str) -> &str {
    commit.get(..SHORT_HASH_LEN).unwrap_or(commit)
}

fn io_error(path: &Path, e: io::Error) -> StorageError {
    StorageError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_hash_truncates_long_ids_only() {
        assert_eq!(short_hash("0123456789abcdef"), "0123456");
        assert_eq!(short_hash("abc"), "abc");
    }

    #[test]
    fn fingerprint_is_fixed_width_hex() {
        assert_eq!(format_fingerprint(255), "00000000000000ff");
    }
}
