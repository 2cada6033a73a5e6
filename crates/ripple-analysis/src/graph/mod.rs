//! Graph consumers: test topology and impact analysis.

pub mod impact;
pub mod test_topology;
