//! Rule to require well-formed doc comments on exported types.
//!
//! # Rationale
//!
//! Godoc renders the comment directly above a declaration. A comment that
//! starts with the declared name reads as a sentence in the rendered output
//! and is easy to find with grep.
//!
//! # Detected Patterns
//!
//! - Exported type without a doc comment, on the spec or its declaration
//! - Doc comment that does not start with the type name, optionally after
//!   `A`, `An` or `The`
//!
//! # Good Patterns
//!
//! ```go
//! // A Widget renders part of the screen.
//! type Widget struct{}
//! ```

use golint_core::facts::{CommentGroup, Decl, TypeSpec};
use golint_core::{category, FileContext, PassState, Problem, Rule, DOC_COMMENTS_LINK};

/// Rule name for exported-type-doc.
pub const NAME: &str = "exported-type-doc";

/// Articles allowed before the type name.
const ARTICLES: [&str; 3] = ["A", "An", "The"];

/// Confidence of a doc comment in the wrong form.
pub(crate) const DOC_FORM_CONFIDENCE: f64 = 0.8;

/// Requires doc comments on exported types.
#[derive(Debug, Clone, Default)]
pub struct ExportedTypeDoc;

impl ExportedTypeDoc {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ExportedTypeDoc {
    fn name(&self) -> &'static str {
        NAME
    }

    fn category(&self) -> &'static str {
        category::COMMENTS
    }

    fn description(&self) -> &'static str {
        "Requires doc comments of the form \"Name ...\" on exported types"
    }

    fn check(&self, ctx: &FileContext<'_>, _pass: &mut PassState) -> Vec<Problem> {
        let mut problems = Vec::new();

        for (_, decl) in ctx.decls() {
            let Decl::Type(decl) = decl else {
                continue;
            };
            for spec in &decl.specs {
                let doc = spec.doc.as_ref().or(decl.doc.as_ref());
                if let Some(problem) = check_spec(ctx, spec, doc) {
                    problems.push(problem);
                }
            }
        }

        problems
    }
}

fn check_spec(ctx: &FileContext<'_>, spec: &TypeSpec, doc: Option<&CommentGroup>) -> Option<Problem> {
    let name = &spec.name.name;
    if !spec.name.is_exported() {
        return None;
    }

    let Some(doc) = doc else {
        return Some(
            ctx.problem(
                spec.name.pos,
                1.0,
                category::COMMENTS,
                format!("exported type {name} should have comment or be unexported"),
            )
            .with_link(DOC_COMMENTS_LINK),
        );
    };

    let text = strip_article(&doc.text);
    if text.starts_with(&format!("{name} ")) {
        return None;
    }

    Some(
        ctx.problem(
            doc.pos,
            DOC_FORM_CONFIDENCE,
            category::COMMENTS,
            format!(
                "comment on exported type {name} should be of the form \"{name} ...\" (with optional leading article)"
            ),
        )
        .with_link(DOC_COMMENTS_LINK),
    )
}

fn strip_article(text: &str) -> &str {
    ARTICLES
        .iter()
        .find_map(|article| {
            text.strip_prefix(article)
                .and_then(|rest| rest.strip_prefix(' '))
        })
        .unwrap_or(text)
}
