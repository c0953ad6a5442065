//! Rule to require doc comments on exported package-level values.
//!
//! # Detected Patterns
//!
//! - Exported name declared after the first name of a spec
//!   (`var a, B = 1, 2`)
//! - Exported const or var without a doc comment on its spec or on its
//!   declaration; reported once per declaration
//! - Doc comment that does not start with the value name, unless the
//!   comment belongs to a parenthesized block
//!
//! # Good Patterns
//!
//! ```go
//! // Errors returned by the client.
//! var (
//!     ErrClosed  = errors.New("closed")
//!     ErrTimeout = errors.New("timeout")
//! )
//! ```

use golint_core::facts::{Decl, ValueDecl, ValueKind, ValueSpec};
use golint_core::{
    category, FileContext, GroupId, PassState, Problem, Rule, DOC_COMMENTS_LINK,
};

use crate::exported_type_doc::DOC_FORM_CONFIDENCE;

/// Rule name for exported-value-doc.
pub const NAME: &str = "exported-value-doc";

/// Requires doc comments on exported constants and variables.
#[derive(Debug, Clone, Default)]
pub struct ExportedValueDoc;

impl ExportedValueDoc {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ExportedValueDoc {
    fn name(&self) -> &'static str {
        NAME
    }

    fn category(&self) -> &'static str {
        category::COMMENTS
    }

    fn description(&self) -> &'static str {
        "Requires doc comments on exported constants and variables"
    }

    fn check(&self, ctx: &FileContext<'_>, pass: &mut PassState) -> Vec<Problem> {
        let mut problems = Vec::new();

        for (group, decl) in ctx.decls() {
            let Decl::Value(decl) = decl else {
                continue;
            };
            for spec in &decl.specs {
                if let Some(problem) = check_spec(ctx, pass, group, decl, spec) {
                    problems.push(problem);
                }
            }
        }

        problems
    }
}

fn check_spec(
    ctx: &FileContext<'_>,
    pass: &mut PassState,
    group: GroupId,
    decl: &ValueDecl,
    spec: &ValueSpec,
) -> Option<Problem> {
    let kind = decl.kind;
    let first = spec.names.first()?;

    if let Some(extra) = spec.names.iter().skip(1).find(|n| n.is_exported()) {
        return Some(ctx.problem(
            spec.pos,
            1.0,
            category::COMMENTS,
            format!("exported {kind} {} should have its own declaration", extra.name),
        ));
    }

    let name = &first.name;
    if !first.is_exported() {
        return None;
    }

    let doc = match (&spec.doc, &decl.doc) {
        (None, None) => {
            if !pass.mark_missing_comment(group) {
                return None;
            }
            let block = if kind == ValueKind::Const && decl.grouped {
                " (or a comment on this block)"
            } else {
                ""
            };
            return Some(
                ctx.problem(
                    spec.pos,
                    1.0,
                    category::COMMENTS,
                    format!("exported {kind} {name} should have comment{block} or be unexported"),
                )
                .with_link(DOC_COMMENTS_LINK),
            );
        }
        // A commented block documents its members as a whole.
        (_, Some(_)) if decl.grouped => return None,
        (Some(doc), _) | (None, Some(doc)) => doc,
    };

    let prefix = format!("{name} ");
    if doc.text.starts_with(&prefix) {
        return None;
    }

    Some(
        ctx.problem(
            doc.pos,
            DOC_FORM_CONFIDENCE,
            category::COMMENTS,
            format!("comment on exported {kind} {name} should be of the form \"{prefix}...\""),
        )
        .with_link(DOC_COMMENTS_LINK),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::check_source;

    fn check_code(code: &str) -> Vec<Problem> {
        check_source(&ExportedValueDoc::new(), code)
    }

    fn texts(problems: &[Problem]) -> Vec<&str> {
        problems.iter().map(|p| p.text.as_str()).collect()
    }

    #[test]
    fn test_detects_missing_var_doc() {
        let problems = check_code("package foo\n\nvar Timeout = 3\n");
        assert_eq!(
            texts(&problems),
            ["exported var Timeout should have comment or be unexported"]
        );
        assert_eq!(problems[0].position.column, 5);
    }

    #[test]
    fn test_const_block_suffix() {
        let problems = check_code("package foo\n\nconst (\n\tA = 1\n\tB = 2\n)\n");
        assert_eq!(
            texts(&problems),
            ["exported const A should have comment (or a comment on this block) or be unexported"]
        );
    }

    #[test]
    fn test_reports_once_per_group() {
        let problems = check_code("package foo\n\nvar (\n\tA = 1\n\tB = 2\n\tC = 3\n)\n");
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].position.line, 4);
    }

    #[test]
    fn test_separate_groups_each_report() {
        let problems = check_code("package foo\n\nvar A = 1\n\nvar B = 2\n");
        assert_eq!(problems.len(), 2);
    }

    #[test]
    fn test_detects_exported_second_name() {
        let problems = check_code("package foo\n\n// a is a.\nvar a, B = 1, 2\n");
        assert_eq!(
            texts(&problems),
            ["exported var B should have its own declaration"]
        );
    }

    #[test]
    fn test_commented_block_skips_form_check() {
        let problems = check_code("package foo\n\n// Limits.\nconst (\n\tMax = 1\n\tMin = 0\n)\n");
        assert!(problems.is_empty());
    }

    #[test]
    fn test_spec_doc_form_check() {
        let problems = check_code(
            "package foo\n\nconst (\n\t// Max is the limit.\n\tMax = 1\n\t// The floor.\n\tMin = 0\n)\n",
        );
        assert_eq!(
            texts(&problems),
            ["comment on exported const Min should be of the form \"Min ...\""]
        );
        assert_eq!(problems[0].position.line, 6);
    }

    #[test]
    fn test_single_decl_form_check() {
        let problems = check_code("package foo\n\n// The timeout.\nvar Timeout = 3\n");
        assert_eq!(
            texts(&problems),
            ["comment on exported var Timeout should be of the form \"Timeout ...\""]
        );
        assert!(check_code("package foo\n\n// Timeout is long.\nvar Timeout = 3\n").is_empty());
    }

    #[test]
    fn test_ignores_unexported() {
        assert!(check_code("package foo\n\nvar timeout = 3\n").is_empty());
    }
}
