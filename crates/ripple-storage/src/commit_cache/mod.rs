//! Commit cache — hash-addressed impact documents.

pub mod cache;
pub mod types;

pub use cache::{CommitCache, CACHE_FILE_NAME, SHORT_HASH_LEN};
pub use types::{CacheDocument, CacheInfo};
