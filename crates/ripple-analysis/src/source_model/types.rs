//! Facts a source model yields for one file.

use ripple_core::types::collections::SmallVec2;
use serde::{Deserialize, Serialize};

/// A source file as read from a revision. `path` is repository-relative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: String,
    pub content: Vec<u8>,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// What kind of body a declaration stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclKind {
    /// A named method of a named type.
    Method,
    /// A closure. `method_name` on the declaration is the enclosing method.
    Lambda,
    /// A method of an anonymous class body. `body` is the body's ordinal
    /// within its file, so methods of one body share a synthetic owner.
    AnonymousMethod { body: u32 },
}

/// One declared method and the call targets found inside it.
///
/// Invocation targets are `name` or `receiver.name`. Nested closures and
/// anonymous bodies contribute their targets to the enclosing method too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    /// Qualified name of the declaring (or enclosing) named type.
    pub owner_name: String,
    pub method_name: String,
    /// 1-based, inclusive.
    pub start_line: u32,
    /// 1-based, inclusive.
    pub end_line: u32,
    pub kind: DeclKind,
    /// Annotation names as written (`Test`, `org.junit.Test`).
    pub annotations: SmallVec2<String>,
    pub invocation_targets: Vec<String>,
}

impl MethodDecl {
    pub fn has_annotation(&self, simple_name: &str) -> bool {
        self.annotations
            .iter()
            .any(|a| a.rsplit('.').next().unwrap_or(a) == simple_name)
    }
}

/// Declarations of one file plus how many syntax errors were tolerated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedFile {
    pub path: String,
    pub declarations: Vec<MethodDecl>,
    pub syntax_errors: u32,
}
