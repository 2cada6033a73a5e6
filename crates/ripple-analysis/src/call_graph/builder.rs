//! CallGraphBuilder — turns an analysis unit into a call graph.

use std::time::Instant;

use ripple_core::types::collections::FxHashMap;
use ripple_core::MethodRef;

use crate::source_model::{DeclKind, MethodDecl};

use super::resolution::ResolutionIndex;
use super::types::{CallGraph, CallGraphBuild, CallGraphStats, MethodGraph, MethodSpan};
use super::unit::AnalysisUnit;

const LAMBDA_MARKER: &str = "$lambda$";
const ANONYMOUS_MARKER: &str = "$Anonymous";

/// Whether `method` names a closure or an anonymous-class method minted by
/// [`CallGraphBuilder`].
pub fn is_synthetic(method: &MethodRef) -> bool {
    let numbered = |rest: &str| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit());
    let lambda = method
        .method()
        .rsplit_once(LAMBDA_MARKER)
        .is_some_and(|(_, n)| numbered(n));
    let anonymous = method
        .owner()
        .rsplit_once(ANONYMOUS_MARKER)
        .is_some_and(|(_, n)| numbered(n));
    lambda || anonymous
}

/// Builds one call graph. Synthetic-name counters live here, so names are
/// unique within one build and a fresh builder starts again at 1.
#[derive(Debug, Default)]
pub struct CallGraphBuilder {
    next_lambda: u32,
    next_anonymous: u32,
    /// `(file, body ordinal)` → assigned anonymous number.
    anonymous_bodies: FxHashMap<(usize, u32), u32>,
}

impl CallGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Phase 1: one vertex per declaration, in file order.
    /// Phase 2: resolve every invocation target into an edge.
    pub fn build(mut self, unit: &AnalysisUnit) -> CallGraphBuild {
        let start = Instant::now();
        let mut graph = MethodGraph::default();
        let mut index = ResolutionIndex::default();
        let mut spans = Vec::new();
        let mut vertices = Vec::with_capacity(unit.files.len());

        // Phase 1
        for (file_idx, file) in unit.files.iter().enumerate() {
            let mut file_vertices = Vec::with_capacity(file.declarations.len());
            for decl in &file.declarations {
                let method = self.identity(file_idx, decl);
                let synthetic = decl.kind != DeclKind::Method;
                if !synthetic {
                    index.insert(&method);
                }
                spans.push(MethodSpan {
                    method: method.clone(),
                    file: file.path.clone(),
                    start_line: decl.start_line,
                    end_line: decl.end_line,
                    synthetic,
                });
                file_vertices.push(graph.add_method(method));
            }
            vertices.push(file_vertices);
        }

        // Phase 2
        let mut resolution_counts = FxHashMap::default();
        let mut total_calls = 0usize;
        let mut resolved = 0usize;
        for (file, file_vertices) in unit.files.iter().zip(&vertices) {
            for (decl, &caller) in file.declarations.iter().zip(file_vertices) {
                let caller_owner = graph.method(caller).owner().to_string();
                for target in &decl.invocation_targets {
                    total_calls += 1;
                    let Some((callee, resolution)) = index.resolve(target, &caller_owner) else {
                        continue;
                    };
                    if let Some(callee_idx) = graph.node(&callee) {
                        graph.add_edge(caller, callee_idx);
                        *resolution_counts.entry(resolution.name()).or_default() += 1;
                        resolved += 1;
                    }
                }
            }
        }

        let stats = CallGraphStats {
            total_methods: graph.method_count(),
            total_edges: graph.edge_count(),
            synthetic_methods: spans.iter().filter(|s| s.synthetic).count(),
            files_analyzed: unit.files.len(),
            files_skipped: unit.skipped,
            files_truncated: unit.truncated,
            resolution_counts,
            unresolved_calls: total_calls - resolved,
            resolution_rate: if total_calls > 0 {
                resolved as f64 / total_calls as f64
            } else {
                0.0
            },
            build_duration: start.elapsed(),
        };

        CallGraphBuild {
            graph: CallGraph { inner: graph },
            spans,
            stats,
        }
    }

    /// Vertex identity for a declaration. Lambdas become
    /// `Owner.<method>$lambda$<n>`; anonymous-class methods become
    /// `Owner$Anonymous<n>.<method>`, one `<n>` per anonymous body.
    fn identity(&mut self, file_idx: usize, decl: &MethodDecl) -> MethodRef {
        match decl.kind {
            DeclKind::Method => MethodRef::new(&decl.owner_name, &decl.method_name),
            DeclKind::Lambda => {
                self.next_lambda += 1;
                MethodRef::new(
                    &decl.owner_name,
                    format!("{}{LAMBDA_MARKER}{}", decl.method_name, self.next_lambda),
                )
            }
            DeclKind::AnonymousMethod { body } => {
                let key = (file_idx, body);
                let n = match self.anonymous_bodies.get(&key) {
                    Some(&n) => n,
                    None => {
                        self.next_anonymous += 1;
                        self.anonymous_bodies.insert(key, self.next_anonymous);
                        self.next_anonymous
                    }
                };
                MethodRef::new(format!("{}{ANONYMOUS_MARKER}{n}", decl.owner_name), &decl.method_name)
            }
        }
    }
}
