//! Language-agnostic extraction trait.
//!
//! `LanguageExtractor` is the seam between a parser front end and the
//! engine: it turns source text into the [`SourceFile`] facts that rules
//! consume.

use golint_core::facts::SourceFile;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while turning source text into facts.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The grammar could not be loaded into the parser.
    #[error("failed to load {language} grammar: {message}")]
    Language {
        /// Language identifier.
        language: &'static str,
        /// Loader error message.
        message: String,
    },

    /// The parser gave up on the file.
    #[error("failed to parse {path}")]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
    },

    /// The file contains syntax errors.
    #[error("{path}:{line}:{column}: syntax error")]
    Syntax {
        /// File with the error.
        path: PathBuf,
        /// Line of the first error (1-indexed).
        line: usize,
        /// Column of the first error (1-indexed).
        column: usize,
    },

    /// The file has no package clause.
    #[error("{path}: expected package clause")]
    MissingPackage {
        /// File without a package clause.
        path: PathBuf,
    },
}

/// Trait for language-specific Tree-sitter extraction.
pub trait LanguageExtractor: Send + Sync {
    /// Language identifier (e.g., `"go"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this extractor handles (e.g., `&[".go"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Extracts the facts of one source file.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be parsed into a complete file.
    fn extract(&self, path: &Path, source: &str) -> Result<SourceFile, ExtractError>;

    /// Whether this extractor handles `path`, judged by extension.
    fn handles(&self, path: &Path) -> bool {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();
        self.extensions().contains(&ext.as_str())
    }
}
