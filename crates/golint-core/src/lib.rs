//! # golint-core
//!
//! Rule-evaluation and problem-aggregation engine for Go style linting.
//!
//! The engine consumes already-parsed [`facts`] for the files of one package
//! and produces an ordered list of [`Problem`]s. It is organised as a
//! two-phase pipeline:
//!
//! 1. [`PackageContext::build`] derives package-wide facts (sortable types,
//!    generated files, receiver names) from every file.
//! 2. Each [`Rule`] checks each file; results flow into a
//!    [`ProblemCollector`], which orders and deduplicates them, and are then
//!    cut at the minimum confidence by [`filter`].
//!
//! ## Example
//!
//! ```ignore
//! use golint_core::Linter;
//!
//! let linter = Linter::builder()
//!     .rule(MyRule::new())
//!     .min_confidence(0.8)
//!     .build()?;
//!
//! let report = linter.lint(&files)?;
//! for problem in &report.problems {
//!     println!("{problem}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod collector;
mod config;
mod context;
mod filter;
mod linter;
mod rule;
mod types;

pub mod facts;

pub use collector::ProblemCollector;
pub use config::{
    Config, ConfigError, DiscoveryConfig, Policy, PolicyConfig, DEFAULT_GENERATED_MARKER,
    DEFAULT_KNOWN_NAME_EXCEPTIONS, DEFAULT_MIN_CONFIDENCE,
};
pub use context::{FileContext, GroupId, PackageContext, PassState};
pub use filter::{filter, filter_with, MinConfidence};
pub use linter::{LintError, Linter, LinterBuilder};
pub use rule::{Rule, RuleBox};
pub use types::{
    category, LintReport, Position, Problem, ProblemDiagnostic, DOC_COMMENTS_LINK,
    STYLE_GUIDE_BASE,
};
