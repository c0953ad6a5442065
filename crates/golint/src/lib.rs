//! # golint
//!
//! Style linter for Go source code.
//!
//! This is the facade crate: it re-exports the engine, the built-in rules
//! and the tree-sitter Go front end, and offers [`lint`] as the one-call
//! entry point.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use golint::{GoExtractor, LanguageExtractor};
//!
//! let extractor = GoExtractor::new();
//! let files = vec![
//!     extractor.extract("foo/foo.go".as_ref(), &std::fs::read_to_string("foo/foo.go")?)?,
//! ];
//!
//! for problem in golint::lint(&files, None)? {
//!     println!("{problem}");
//! }
//! ```
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use golint::{Config, Linter};
//!
//! let linter = Linter::builder()
//!     .rules(golint::rules::default_rules())
//!     .config(Config::from_file("golint.toml".as_ref())?)
//!     .min_confidence(0.5)
//!     .build()?;
//!
//! let report = linter.lint(&files)?;
//! ```

#![forbid(unsafe_code)]

// Re-export core types and traits
pub use golint_core::*;

// Re-export the Go front end
pub use golint_ts::{ExtractError, GoExtractor, LanguageExtractor};

/// Built-in rules.
pub mod rules {
    pub use golint_rules::*;
}

/// Lints the files of one package with the built-in rules.
///
/// Returns the problems at or above `min_confidence` (default 0.8), ordered
/// by file, line and column.
///
/// # Errors
///
/// Returns [`LintError::InvalidConfidence`] if `min_confidence` is outside
/// (0, 1], and [`LintError::MixedPackages`] if the files belong to more
/// than one package.
pub fn lint(
    files: &[facts::SourceFile],
    min_confidence: Option<f64>,
) -> Result<Vec<Problem>, LintError> {
    let mut builder = Linter::builder().rules(golint_rules::default_rules());
    if let Some(min_confidence) = min_confidence {
        builder = builder.min_confidence(min_confidence);
    }
    Ok(builder.build()?.lint(files)?.problems)
}
