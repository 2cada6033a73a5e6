//! The seam between the impact engine and language front ends.

use ripple_core::errors::ParseError;

use super::types::{ParsedFile, SourceFile};

/// Turns source files into method facts. Syntax errors inside a file are
/// tolerated and counted in [`ParsedFile::syntax_errors`]; an `Err` means
/// the file could not be read at all and is skipped by the caller.
pub trait SourceModel: Send + Sync {
    /// Whether this model understands files at `path`.
    fn supports(&self, path: &str) -> bool;

    fn parse_file(&self, file: &SourceFile) -> Result<ParsedFile, ParseError>;
}
