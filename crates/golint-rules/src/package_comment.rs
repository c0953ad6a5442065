//! Rule to check the package comment.
//!
//! # Detected Patterns
//!
//! - Package comment separated from the `package` clause by blank lines
//! - No package comment in any file of the package
//! - Package comment starting with white space
//! - Package comment not of the form `Package foo ...` (except for `main`)
//!
//! Test files are not checked.

use golint_core::facts::Pos;
use golint_core::{category, FileContext, PassState, Problem, Rule, STYLE_GUIDE_BASE};

/// Rule name for package-comment.
pub const NAME: &str = "package-comment";

/// Checks presence, placement and form of the package comment.
#[derive(Debug, Clone, Default)]
pub struct PackageComment;

impl PackageComment {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for PackageComment {
    fn name(&self) -> &'static str {
        NAME
    }

    fn category(&self) -> &'static str {
        category::COMMENTS
    }

    fn description(&self) -> &'static str {
        "Checks that the package comment exists and reads \"Package name ...\""
    }

    fn check(&self, ctx: &FileContext<'_>, _pass: &mut PassState) -> Vec<Problem> {
        let file = ctx.file;
        if file.is_test() {
            return Vec::new();
        }

        let link = format!("{STYLE_GUIDE_BASE}#package-comments");
        let prefix = format!("Package {} ", file.package.name);
        let problem = |pos: Pos, confidence: f64, text: String| {
            ctx.problem(pos, confidence, category::COMMENTS, text)
                .with_link(link.clone())
        };

        if let Some(last) = file.leading_comments.last() {
            if last.text.starts_with(&prefix) && last.end_line + 1 < file.package_pos.line {
                return vec![problem(
                    Pos::new(last.end_line + 1, 1),
                    0.9,
                    "package comment is detached; there should be no blank lines between it and the package statement".to_string(),
                )];
            }
        }

        let Some(doc) = &file.package_doc else {
            if ctx.package.is_documented() {
                return Vec::new();
            }
            return vec![problem(
                file.package_pos,
                0.2,
                "should have a package comment, unless it's in another file for this package"
                    .to_string(),
            )];
        };

        let mut problems = Vec::new();
        let mut text = doc.text.as_str();
        let trimmed = text.trim_start_matches(|c: char| c == ' ' || c == '\t');
        if trimmed.len() != text.len() {
            problems.push(problem(
                doc.pos,
                1.0,
                "package comment should not have leading space".to_string(),
            ));
            text = trimmed;
        }

        if !ctx.package.is_main() && !text.starts_with(&prefix) {
            problems.push(problem(
                doc.pos,
                1.0,
                format!("package comment should be of the form \"{prefix}...\""),
            ));
        }

        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{check_files, check_source, parse};

    fn check_code(code: &str) -> Vec<Problem> {
        check_source(&PackageComment::new(), code)
    }

    fn texts(problems: &[Problem]) -> Vec<&str> {
        problems.iter().map(|p| p.text.as_str()).collect()
    }

    #[test]
    fn test_accepts_good_comment() {
        assert!(check_code("// Package foo does things.\npackage foo\n").is_empty());
    }

    #[test]
    fn test_detects_missing_comment() {
        let problems = check_code("package foo\n");
        assert_eq!(
            texts(&problems),
            ["should have a package comment, unless it's in another file for this package"]
        );
        assert!((problems[0].confidence - 0.2).abs() < f64::EPSILON);
        assert_eq!(problems[0].position.line, 1);
    }

    #[test]
    fn test_comment_in_another_file() {
        let a = parse("a.go", "// Package foo does things.\npackage foo\n");
        let b = parse("b.go", "package foo\n");
        assert!(check_files(&PackageComment::new(), &[a, b]).is_empty());
    }

    #[test]
    fn test_detects_detached_comment() {
        let problems = check_code("// Package foo does things.\n\npackage foo\n");
        assert_eq!(
            texts(&problems),
            ["package comment is detached; there should be no blank lines between it and the package statement"]
        );
        assert_eq!(problems[0].position.line, 2);
        assert_eq!(problems[0].position.column, 1);
    }

    #[test]
    fn test_detects_wrong_form() {
        let problems = check_code("// This package does things.\npackage foo\n");
        assert_eq!(
            texts(&problems),
            ["package comment should be of the form \"Package foo ...\""]
        );
    }

    #[test]
    fn test_detects_leading_space() {
        let problems = check_code("//  Package foo does things.\npackage foo\n");
        assert_eq!(
            texts(&problems),
            ["package comment should not have leading space"]
        );
    }

    #[test]
    fn test_main_is_free_form() {
        assert!(check_code("// Command foo does things.\npackage main\n").is_empty());
    }

    #[test]
    fn test_skips_test_files() {
        let file = parse("foo_test.go", "package foo\n");
        assert!(check_files(&PackageComment::new(), &[file]).is_empty());
    }
}
