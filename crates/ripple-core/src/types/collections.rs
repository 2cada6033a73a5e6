//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;
pub use std::collections::{BTreeMap, BTreeSet};

/// SmallVec sized for method annotations (usually <3).
pub type SmallVec2<T> = SmallVec<[T; 2]>;
