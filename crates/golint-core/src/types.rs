//! Core types for lint problems and reports.

use miette::{Diagnostic, SourceSpan};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Base URL of the Go code review style guide.
pub const STYLE_GUIDE_BASE: &str = "https://golang.org/wiki/CodeReviewComments";

/// Link to the doc comment section of the style guide.
pub const DOC_COMMENTS_LINK: &str = "https://golang.org/wiki/CodeReviewComments#doc-comments";

/// Well-known problem categories.
pub mod category {
    /// Doc comment presence and form.
    pub const COMMENTS: &str = "comments";
    /// Identifier naming.
    pub const NAMING: &str = "naming";
}

/// Source position of a problem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// File the problem was found in.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, in bytes).
    pub column: usize,
    /// Byte offset in file (for miette integration).
    #[serde(default)]
    pub offset: usize,
}

impl Position {
    /// Creates a new position with explicit values.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
            offset: 0,
        }
    }

    /// Sets the byte offset of this position.
    #[must_use]
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// A problem found in some source code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    /// Position in source file.
    pub position: Position,
    /// The prose that describes the problem.
    pub text: String,
    /// A short name for the general category of the problem.
    pub category: String,
    /// A value in (0,1] estimating the confidence in this problem's correctness.
    pub confidence: f64,
    /// Link to the style guide for the problem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// The source line.
    #[serde(default)]
    pub line_text: String,
    /// Full replacement for the relevant line of the source file, if one is suggested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement_line: Option<String>,
    /// Name of the rule that produced the problem.
    #[serde(default)]
    pub rule: String,
}

impl Problem {
    /// Creates a new problem.
    ///
    /// `confidence` is expected in (0,1]; rules pass constants.
    #[must_use]
    pub fn new(
        position: Position,
        confidence: f64,
        category: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        debug_assert!(confidence > 0.0 && confidence <= 1.0);
        Self {
            position,
            text: text.into(),
            category: category.into(),
            confidence,
            link: None,
            line_text: String::new(),
            replacement_line: None,
            rule: String::new(),
        }
    }

    /// Adds a style guide link to this problem.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Sets the source line this problem points at.
    #[must_use]
    pub fn with_line_text(mut self, line_text: impl Into<String>) -> Self {
        self.line_text = line_text.into();
        self
    }

    /// Adds a suggested replacement for the whole source line.
    #[must_use]
    pub fn with_replacement(mut self, replacement_line: impl Into<String>) -> Self {
        self.replacement_line = Some(replacement_line.into());
        self
    }

    /// Records the rule that produced this problem.
    #[must_use]
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = rule.into();
        self
    }

    /// Formats the problem for verbose terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!("{}: {}\n", self.position, self.text);
        let _ = writeln!(
            output,
            "  = {} ({}, confidence {})",
            self.category, self.rule, self.confidence
        );
        if !self.line_text.is_empty() {
            let _ = writeln!(output, "  | {}", self.line_text);
        }
        if let Some(replacement) = &self.replacement_line {
            let _ = writeln!(output, "  = help: {}", replacement.trim());
        }
        if let Some(link) = &self.link {
            let _ = writeln!(output, "  = see: {link}");
        }
        output
    }
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.position, self.text)
    }
}

/// Converts a Problem to a miette Diagnostic for rich error display.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct ProblemDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl From<&Problem> for ProblemDiagnostic {
    fn from(p: &Problem) -> Self {
        Self {
            message: p.text.clone(),
            help: p
                .replacement_line
                .as_ref()
                .map(|line| format!("replace with `{}`", line.trim()))
                .or_else(|| p.link.as_ref().map(|link| format!("see {link}"))),
            span: SourceSpan::from((p.position.offset, 0)),
            label_message: format!("{} ({})", p.category, p.confidence),
        }
    }
}

/// Result of linting one package.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintReport {
    /// Ordered, deduplicated, confidence-filtered problems.
    pub problems: Vec<Problem>,
    /// Number of files checked.
    pub files_checked: usize,
}

impl LintReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no problem was reported.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }

    /// Counts problems per category.
    #[must_use]
    pub fn count_by_category(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for p in &self.problems {
            *counts.entry(p.category.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Adds problems from another report.
    pub fn extend(&mut self, other: Self) {
        self.problems.extend(other.problems);
        self.files_checked += other.files_checked;
    }
}
