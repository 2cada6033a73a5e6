//! Call graph types — forward and reverse graphs, spans, resolution, stats.

use std::time::Duration;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use ripple_core::types::collections::FxHashMap;
use ripple_core::MethodRef;
use serde::{Deserialize, Serialize};

/// A directed graph over MethodRefs with O(1) vertex lookup.
/// Shared representation of the forward and reverse graphs.
#[derive(Debug, Clone, Default)]
pub struct MethodGraph {
    graph: DiGraph<MethodRef, ()>,
    index: FxHashMap<MethodRef, NodeIndex>,
}

impl MethodGraph {
    pub(crate) fn add_method(&mut self, method: MethodRef) -> NodeIndex {
        if let Some(&existing) = self.index.get(&method) {
            return existing;
        }
        let idx = self.graph.add_node(method.clone());
        self.index.insert(method, idx);
        idx
    }

    /// Adds `from → to` once; repeated calls are no-ops. Returns whether it was new.
    pub(crate) fn add_edge(&mut self, from: NodeIndex, to: NodeIndex) -> bool {
        if self.graph.find_edge(from, to).is_some() {
            return false;
        }
        self.graph.add_edge(from, to, ());
        true
    }

    pub fn node(&self, method: &MethodRef) -> Option<NodeIndex> {
        self.index.get(method).copied()
    }

    pub fn contains(&self, method: &MethodRef) -> bool {
        self.index.contains_key(method)
    }

    pub fn method(&self, idx: NodeIndex) -> &MethodRef {
        &self.graph[idx]
    }

    pub fn method_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All vertices in insertion order.
    pub fn methods(&self) -> impl Iterator<Item = &MethodRef> {
        self.graph.node_weights()
    }

    /// All edges as `(from, to)`.
    pub fn edges(&self) -> impl Iterator<Item = (&MethodRef, &MethodRef)> {
        self.graph
            .edge_references()
            .map(|e| (&self.graph[e.source()], &self.graph[e.target()]))
    }

    /// Outgoing neighbours. An unknown method has none.
    pub fn successors<'a>(&'a self, method: &MethodRef) -> impl Iterator<Item = &'a MethodRef> + 'a {
        self.node(method)
            .into_iter()
            .flat_map(move |idx| self.graph.neighbors_directed(idx, Direction::Outgoing))
            .map(move |n| &self.graph[n])
    }

    pub(crate) fn successor_indices(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_directed(idx, Direction::Outgoing)
    }
}

/// Forward call graph: an edge `A → B` means A invokes B.
/// Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct CallGraph {
    pub(crate) inner: MethodGraph,
}

impl CallGraph {
    /// Methods `method` calls directly.
    pub fn callees<'a>(&'a self, method: &MethodRef) -> impl Iterator<Item = &'a MethodRef> + 'a {
        self.inner.successors(method)
    }

    pub fn graph(&self) -> &MethodGraph {
        &self.inner
    }

    pub fn contains(&self, method: &MethodRef) -> bool {
        self.inner.contains(method)
    }

    pub fn method_count(&self) -> usize {
        self.inner.method_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodRef> {
        self.inner.methods()
    }

    pub fn edges(&self) -> impl Iterator<Item = (&MethodRef, &MethodRef)> {
        self.inner.edges()
    }

    /// Assemble a graph from explicit edges. Every endpoint becomes a vertex.
    pub fn from_edges<'a>(
        methods: impl IntoIterator<Item = &'a MethodRef>,
        edges: impl IntoIterator<Item = (&'a MethodRef, &'a MethodRef)>,
    ) -> Self {
        let mut inner = MethodGraph::default();
        for method in methods {
            inner.add_method(method.clone());
        }
        for (from, to) in edges {
            let a = inner.add_method(from.clone());
            let b = inner.add_method(to.clone());
            inner.add_edge(a, b);
        }
        Self { inner }
    }
}

/// Reverse call graph: an edge `B → A` means B is called by A.
/// Derived from exactly one CallGraph; never mutated on its own.
#[derive(Debug, Clone, Default)]
pub struct ReverseCallGraph {
    pub(crate) inner: MethodGraph,
}

impl ReverseCallGraph {
    /// Methods that call `method` directly.
    pub fn callers<'a>(&'a self, method: &MethodRef) -> impl Iterator<Item = &'a MethodRef> + 'a {
        self.inner.successors(method)
    }

    pub fn graph(&self) -> &MethodGraph {
        &self.inner
    }

    pub fn contains(&self, method: &MethodRef) -> bool {
        self.inner.contains(method)
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }
}

/// Where a vertex's body lives, for intersecting with diff hunks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSpan {
    pub method: MethodRef,
    pub file: String,
    /// 1-based, inclusive.
    pub start_line: u32,
    /// 1-based, inclusive.
    pub end_line: u32,
    /// Lambda or anonymous-class vertex.
    pub synthetic: bool,
}

impl MethodSpan {
    pub fn overlaps(&self, start: u32, end: u32) -> bool {
        self.start_line <= end && start <= self.end_line
    }
}

/// How an invocation target was matched to a declared method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    /// `receiver.name` where receiver is a declared owner's qualified name.
    Qualified,
    /// Receiver matches an owner's simple name (case-insensitive).
    ReceiverType,
    /// Unqualified call to a method of the caller's own or enclosing type.
    SameOwner,
    /// The only declared method with that name in the unit.
    UniqueName,
}

impl Resolution {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Qualified => "qualified",
            Self::ReceiverType => "receiver_type",
            Self::SameOwner => "same_owner",
            Self::UniqueName => "unique_name",
        }
    }
}

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct CallGraphStats {
    pub total_methods: usize,
    pub total_edges: usize,
    pub synthetic_methods: usize,
    pub files_analyzed: usize,
    pub files_skipped: usize,
    pub files_truncated: usize,
    pub resolution_counts: FxHashMap<&'static str, usize>,
    pub unresolved_calls: usize,
    /// Resolved invocations over all invocations; 0.0 when there were none.
    pub resolution_rate: f64,
    pub build_duration: Duration,
}

/// Everything one build produces.
#[derive(Debug, Clone, Default)]
pub struct CallGraphBuild {
    pub graph: CallGraph,
    pub spans: Vec<MethodSpan>,
    pub stats: CallGraphStats,
}
