//! Rule to check method receiver names.
//!
//! # Detected Patterns
//!
//! - Receiver named `_`
//! - Receiver named `this` or `self`
//! - Receiver name that differs from the first one used for the same type
//!   anywhere in the package

use golint_core::facts::{Decl, FuncDecl};
use golint_core::{category, FileContext, PassState, Problem, Rule, STYLE_GUIDE_BASE};
use tracing::debug;

/// Rule name for receiver-names.
pub const NAME: &str = "receiver-names";

/// Checks that receiver names are short, meaningful and consistent.
#[derive(Debug, Clone, Default)]
pub struct ReceiverNames;

impl ReceiverNames {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ReceiverNames {
    fn name(&self) -> &'static str {
        NAME
    }

    fn category(&self) -> &'static str {
        category::NAMING
    }

    fn description(&self) -> &'static str {
        "Requires consistent receiver names other than _, this and self"
    }

    fn check(&self, ctx: &FileContext<'_>, _pass: &mut PassState) -> Vec<Problem> {
        ctx.decls()
            .filter_map(|(_, decl)| match decl {
                Decl::Func(func) => check_method(ctx, func),
                _ => None,
            })
            .collect()
    }
}

fn check_method(ctx: &FileContext<'_>, func: &FuncDecl) -> Option<Problem> {
    let receiver = func.receiver.as_ref()?;
    let name = receiver.name.as_ref()?.name.as_str();

    let text = match name {
        "_" => "receiver name should not be an underscore, omit the name if it is unused".to_string(),
        "this" | "self" => "receiver name should be a reflection of its identity; don't use generic names such as \"this\" or \"self\"".to_string(),
        _ => {
            let Some(recv) = receiver.type_name.as_deref() else {
                debug!(
                    "{}:{}: no receiver type for {name}; consistency not checked",
                    ctx.path().display(),
                    func.pos.line
                );
                return None;
            };
            let prev = ctx.package.receiver_name(recv)?;
            if prev == name {
                return None;
            }
            format!("receiver name {name} should be consistent with previous receiver name {prev} for {recv}")
        }
    };

    Some(
        ctx.problem(func.pos, 1.0, category::NAMING, text)
            .with_link(format!("{STYLE_GUIDE_BASE}#receiver-names")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{check_files, check_source, parse};

    fn check_code(code: &str) -> Vec<Problem> {
        check_source(&ReceiverNames::new(), code)
    }

    fn texts(problems: &[Problem]) -> Vec<&str> {
        problems.iter().map(|p| p.text.as_str()).collect()
    }

    #[test]
    fn test_detects_underscore() {
        let problems = check_code("package foo\n\ntype T int\n\nfunc (_ T) A() {}\n");
        assert_eq!(
            texts(&problems),
            ["receiver name should not be an underscore, omit the name if it is unused"]
        );
        assert_eq!(problems[0].position.line, 5);
    }

    #[test]
    fn test_detects_generic_names() {
        let problems = check_code("package foo\n\ntype T int\n\nfunc (this T) A() {}\nfunc (self *T) B() {}\n");
        assert_eq!(problems.len(), 2);
        assert!(problems.iter().all(|p| p.text.contains("\"this\" or \"self\"")));
    }

    #[test]
    fn test_detects_inconsistent_names() {
        let problems = check_code(
            "package foo\n\ntype T int\n\nfunc (t T) A() {}\nfunc (x *T) B() {}\nfunc (t *T) C() {}\nfunc (y T) D() {}\n",
        );
        assert_eq!(
            texts(&problems),
            [
                "receiver name x should be consistent with previous receiver name t for T",
                "receiver name y should be consistent with previous receiver name t for T",
            ]
        );
    }

    #[test]
    fn test_consistency_across_files() {
        let a = parse("a.go", "package foo\n\ntype T int\n\nfunc (t T) A() {}\n");
        let b = parse("b.go", "package foo\n\nfunc (r T) B() {}\n");
        let problems = check_files(&ReceiverNames::new(), &[a, b]);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].position.file.to_str(), Some("b.go"));
    }

    #[test]
    fn test_unnamed_receiver_and_functions() {
        assert!(check_code("package foo\n\ntype T int\n\nfunc (T) A() {}\nfunc F() {}\n").is_empty());
    }

    #[test]
    fn test_receiver_without_type_is_not_compared() {
        use golint_core::facts::{Ident, Pos, Receiver, SourceFile};

        let method = |line: usize, recv: &str| FuncDecl {
            pos: Pos::new(line, 1),
            name: Ident::new("Build", Pos::new(line, 15)),
            receiver: Some(Receiver {
                name: Some(Ident::new(recv, Pos::new(line, 7))),
                type_name: None,
            }),
            doc: None,
        };
        let file = SourceFile::new("foo.go", "foo")
            .with_decl(Decl::Func(method(3, "a")))
            .with_decl(Decl::Func(method(5, "b")));
        assert!(check_files(&ReceiverNames::new(), &[file]).is_empty());
    }
}
