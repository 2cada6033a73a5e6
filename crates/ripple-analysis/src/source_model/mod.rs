//! Source model — turns one source file into method declarations.

pub mod cache;
pub mod java;
pub mod traits;
pub mod types;

pub use cache::ParseCache;
pub use java::JavaSourceModel;
pub use traits::SourceModel;
pub use types::{DeclKind, MethodDecl, ParsedFile, SourceFile};
