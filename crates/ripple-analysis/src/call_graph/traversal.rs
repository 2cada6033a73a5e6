//! Graph reversal and depth-bounded caller traversal.

use std::collections::VecDeque;

use ripple_core::types::collections::FxHashSet;
use ripple_core::MethodRef;

use super::types::{CallGraph, MethodGraph, ReverseCallGraph};

/// Depth that never truncates: each vertex is expanded at most once.
pub const UNBOUNDED: u32 = u32::MAX;

/// Invert every edge. Vertices keep their forward-graph order, so methods
/// nobody calls are still present.
pub fn reverse(graph: &CallGraph) -> ReverseCallGraph {
    let mut inner = MethodGraph::default();
    for method in graph.methods() {
        inner.add_method(method.clone());
    }
    for (caller, callee) in graph.edges() {
        let from = inner.add_method(callee.clone());
        let to = inner.add_method(caller.clone());
        inner.add_edge(from, to);
    }
    ReverseCallGraph { inner }
}

/// Everything that reaches any seed in `1..=max_depth` call hops.
///
/// Breadth-first from all seeds at depth 0. A vertex enters the result the
/// first time it is reached and is expanded only then. Seeds are included
/// only when they call another seed (or themselves, transitively).
pub fn transitive_callers<'a>(
    seeds: impl IntoIterator<Item = &'a MethodRef>,
    reverse: &ReverseCallGraph,
    max_depth: u32,
) -> FxHashSet<MethodRef> {
    let graph = reverse.graph();
    let mut result = FxHashSet::default();
    let mut queue = VecDeque::new();

    for seed in seeds {
        if let Some(idx) = graph.node(seed) {
            queue.push_back((idx, 0u32));
        }
    }

    while let Some((node, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }
        for caller in graph.successor_indices(node) {
            if result.insert(caller) {
                queue.push_back((caller, depth + 1));
            }
        }
    }

    result
        .into_iter()
        .map(|idx| graph.method(idx).clone())
        .collect()
}
