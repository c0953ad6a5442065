//! Rule to require well-formed doc comments on exported functions and methods.
//!
//! # Detected Patterns
//!
//! - Exported function, or exported method on an exported type, without a
//!   doc comment
//! - Doc comment that does not start with the function name
//!
//! Methods that implement well-known interfaces (`Error`, `Read`,
//! `ServeHTTP`, `String`, `Write`) are exempt, as are `Len`, `Less` and
//! `Swap` on types that declare all three.

use golint_core::facts::{is_exported, Decl, FuncDecl};
use golint_core::{category, FileContext, PassState, Problem, Rule, DOC_COMMENTS_LINK};
use tracing::debug;

use crate::exported_type_doc::DOC_FORM_CONFIDENCE;

/// Rule name for exported-func-doc.
pub const NAME: &str = "exported-func-doc";

/// Methods whose meaning is fixed by a well-known interface.
const COMMON_METHODS: [&str; 5] = ["Error", "Read", "ServeHTTP", "String", "Write"];

/// Methods exempt on sortable receivers.
const SORT_METHODS: [&str; 3] = ["Len", "Less", "Swap"];

/// Requires doc comments on exported functions and methods.
#[derive(Debug, Clone, Default)]
pub struct ExportedFuncDoc;

impl ExportedFuncDoc {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ExportedFuncDoc {
    fn name(&self) -> &'static str {
        NAME
    }

    fn category(&self) -> &'static str {
        category::COMMENTS
    }

    fn description(&self) -> &'static str {
        "Requires doc comments of the form \"Name ...\" on exported functions and methods"
    }

    fn check(&self, ctx: &FileContext<'_>, _pass: &mut PassState) -> Vec<Problem> {
        ctx.decls()
            .filter_map(|(_, decl)| match decl {
                Decl::Func(func) => check_func(ctx, func),
                _ => None,
            })
            .collect()
    }
}

fn check_func(ctx: &FileContext<'_>, func: &FuncDecl) -> Option<Problem> {
    let fn_name = func.name.name.as_str();
    if !is_exported(fn_name) {
        return None;
    }

    let (kind, display) = match &func.receiver {
        None => ("function", fn_name.to_string()),
        Some(_) => {
            // Receivers we cannot name are treated as unexported.
            let Some(recv) = func.receiver_type() else {
                debug!(
                    "{}:{}: skipping method {fn_name} without receiver type",
                    ctx.path().display(),
                    func.pos.line
                );
                return None;
            };
            if !is_exported(recv) || COMMON_METHODS.contains(&fn_name) {
                return None;
            }
            if SORT_METHODS.contains(&fn_name) && ctx.package.is_sortable(recv) {
                return None;
            }
            ("method", format!("{recv}.{fn_name}"))
        }
    };

    let Some(doc) = &func.doc else {
        return Some(
            ctx.problem(
                func.pos,
                1.0,
                category::COMMENTS,
                format!("exported {kind} {display} should have comment or be unexported"),
            )
            .with_link(DOC_COMMENTS_LINK),
        );
    };

    let prefix = format!("{fn_name} ");
    if doc.text.starts_with(&prefix) {
        return None;
    }

    Some(
        ctx.problem(
            doc.pos,
            DOC_FORM_CONFIDENCE,
            category::COMMENTS,
            format!("comment on exported {kind} {display} should be of the form \"{prefix}...\""),
        )
        .with_link(DOC_COMMENTS_LINK),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{check_files, check_source, parse};

    fn check_code(code: &str) -> Vec<Problem> {
        check_source(&ExportedFuncDoc::new(), code)
    }

    #[test]
    fn test_detects_missing_function_doc() {
        let problems = check_code("package foo\n\nfunc FooBar() {}\n");
        assert_eq!(problems.len(), 1);
        assert_eq!(
            problems[0].text,
            "exported function FooBar should have comment or be unexported"
        );
        assert_eq!(problems[0].position.line, 3);
        assert_eq!(problems[0].position.column, 1);
    }

    #[test]
    fn test_detects_wrong_form() {
        let problems = check_code("package foo\n\n// Does something.\nfunc FooBar() {}\n");
        assert_eq!(problems.len(), 1);
        assert_eq!(
            problems[0].text,
            "comment on exported function FooBar should be of the form \"FooBar ...\""
        );
        assert_eq!(problems[0].category, "comments");
        assert_eq!(problems[0].position.line, 3);
    }

    #[test]
    fn test_accepts_named_doc() {
        assert!(check_code("package foo\n\n// FooBar does something.\nfunc FooBar() {}\n").is_empty());
    }

    #[test]
    fn test_method_naming() {
        let problems = check_code(
            "package foo\n\ntype T struct{}\n\nfunc (t *T) Run() {}\n\n// Runs fast.\nfunc (t *T) Fast() {}\n",
        );
        assert_eq!(problems.len(), 2);
        assert_eq!(
            problems[0].text,
            "exported method T.Run should have comment or be unexported"
        );
        assert_eq!(
            problems[1].text,
            "comment on exported method T.Fast should be of the form \"Fast ...\""
        );
    }

    #[test]
    fn test_exemptions() {
        let problems = check_code(
            "package foo\n\ntype t struct{}\n\nfunc (x t) Run() {}\n\ntype T struct{}\n\n\
             func (x T) String() string { return \"\" }\nfunc (x T) Error() string { return \"\" }\n\
             func unexported() {}\n",
        );
        assert!(problems.is_empty());
    }

    #[test]
    fn test_sortable_split_across_files() {
        let a = parse(
            "a.go",
            "package foo\n\n// ByName sorts.\ntype ByName []string\n\nfunc (b ByName) Len() int { return 0 }\n",
        );
        let b = parse(
            "b.go",
            "package foo\n\nfunc (b ByName) Swap(i, j int) {}\nfunc (b ByName) Less(i, j int) bool { return false }\n",
        );
        assert!(check_files(&ExportedFuncDoc::new(), &[a, b]).is_empty());
    }

    #[test]
    fn test_not_sortable_without_less() {
        let problems = check_code(
            "package foo\n\ntype ByName []string\n\nfunc (b ByName) Len() int { return 0 }\nfunc (b ByName) Swap(i, j int) {}\n",
        );
        let texts: Vec<&str> = problems.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(
            texts,
            [
                "exported method ByName.Len should have comment or be unexported",
                "exported method ByName.Swap should have comment or be unexported",
            ]
        );
    }

    #[test]
    fn test_method_without_receiver_type_is_skipped() {
        use golint_core::facts::{Ident, Pos, Receiver, SourceFile};

        let method = FuncDecl {
            pos: Pos::new(3, 1),
            name: Ident::new("Build", Pos::new(3, 15)),
            receiver: Some(Receiver {
                name: Some(Ident::new("w", Pos::new(3, 7))),
                type_name: None,
            }),
            doc: None,
        };
        let file = SourceFile::new("foo.go", "foo").with_decl(Decl::Func(method));
        assert!(check_files(&ExportedFuncDoc::new(), &[file]).is_empty());
    }
}
