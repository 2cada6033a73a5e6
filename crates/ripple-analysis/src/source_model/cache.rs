//! Parse cache: Moka in-memory, keyed by content hash.
//! Same content always yields the same declarations, wherever it lives.

use std::sync::Arc;

use moka::sync::Cache;
use xxhash_rust::xxh3::xxh3_64;

use super::types::MethodDecl;

/// Declarations and error count for one file content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedParse {
    pub declarations: Vec<MethodDecl>,
    pub syntax_errors: u32,
}

/// xxh3 hash of file content.
pub fn hash_content(content: &[u8]) -> u64 {
    xxh3_64(content)
}

/// In-memory parse cache using Moka (TinyLFU admission).
pub struct ParseCache {
    inner: Cache<u64, Arc<CachedParse>>,
}

impl ParseCache {
    pub fn new(capacity: u64) -> Self {
        Self {
            inner: Cache::new(capacity),
        }
    }

    pub fn get(&self, content_hash: u64) -> Option<Arc<CachedParse>> {
        self.inner.get(&content_hash)
    }

    pub fn insert(&self, content_hash: u64, parse: Arc<CachedParse>) {
        self.inner.insert(content_hash, parse);
    }

    pub fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }
}

impl Default for ParseCache {
    fn default() -> Self {
        Self::new(10_000)
    }
}
