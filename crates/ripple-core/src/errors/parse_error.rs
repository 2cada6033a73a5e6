//! Source parsing errors. Always recovered per file.

use super::error_code::{self, RippleErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Unsupported source file: {path}")]
    UnsupportedLanguage { path: String },

    #[error("Failed to load {language} grammar: {message}")]
    GrammarLoad { language: String, message: String },

    #[error("Tree-sitter failed on {path}: {message}")]
    TreeSitter { path: String, message: String },

    #[error("{path} is not valid UTF-8")]
    InvalidEncoding { path: String },
}

impl RippleErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedLanguage { .. } => error_code::UNSUPPORTED_LANGUAGE,
            _ => error_code::PARSE_ERROR,
        }
    }
}
