//! # ripple-storage
//!
//! On-disk commit cache. One directory per short commit hash, holding a
//! single `impact.json` document tagged with the full commit id and the
//! fingerprint of the analysis config that produced it.

pub mod commit_cache;

pub use commit_cache::{CacheDocument, CacheInfo, CommitCache};
