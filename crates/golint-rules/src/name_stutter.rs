//! Rule to detect exported names that repeat the package name.
//!
//! # Rationale
//!
//! Clients refer to exported names through the package name. In package
//! `widget`, a type called `WidgetFactory` reads as `widget.WidgetFactory`;
//! `widget.Factory` says the same thing once.
//!
//! # Detected Patterns
//!
//! - Exported type, function, constant or variable whose name starts with
//!   the package name (ignoring case), followed by `_` or an upper-case
//!   letter
//!
//! Names equal to the package name, remainders of two characters or fewer,
//! and names in the known-exception table are accepted.

use golint_core::facts::{Decl, Ident};
use golint_core::{category, FileContext, PassState, Problem, Rule, STYLE_GUIDE_BASE};

/// Rule name for name-stutter.
pub const NAME: &str = "name-stutter";

/// Longest remainder that never counts as stutter.
const MAX_SHORT_REMAINDER: usize = 2;

/// Detects exported names that stutter with the package name.
#[derive(Debug, Clone, Default)]
pub struct NameStutter;

impl NameStutter {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NameStutter {
    fn name(&self) -> &'static str {
        NAME
    }

    fn category(&self) -> &'static str {
        category::NAMING
    }

    fn description(&self) -> &'static str {
        "Detects exported names that repeat the package name"
    }

    fn check(&self, ctx: &FileContext<'_>, _pass: &mut PassState) -> Vec<Problem> {
        let mut problems = Vec::new();
        let mut visit = |id: &Ident, thing: &str| {
            if let Some(problem) = check_ident(ctx, id, thing) {
                problems.push(problem);
            }
        };

        for (_, decl) in ctx.decls() {
            match decl {
                Decl::Type(decl) => {
                    for spec in &decl.specs {
                        visit(&spec.name, "type");
                    }
                }
                Decl::Func(func) if !func.is_method() => visit(&func.name, "func"),
                Decl::Func(_) => {}
                Decl::Value(decl) => {
                    for name in decl.specs.iter().flat_map(|s| s.names.iter()) {
                        visit(name, decl.kind.keyword());
                    }
                }
            }
        }

        problems
    }
}

fn check_ident(ctx: &FileContext<'_>, id: &Ident, thing: &str) -> Option<Problem> {
    let pkg = ctx.package_name();
    let name = id.name.as_str();

    if !id.is_exported() || ctx.policy.is_known_exception(name) {
        return None;
    }
    if name.len() <= pkg.len() {
        return None;
    }

    let head = name.get(..pkg.len())?;
    if !head.eq_ignore_ascii_case(pkg) {
        return None;
    }

    let rem = &name[pkg.len()..];
    if rem.chars().count() <= MAX_SHORT_REMAINDER {
        return None;
    }
    let next = rem.chars().next()?;
    if next != '_' && !next.is_uppercase() {
        return None;
    }

    Some(
        ctx.problem(
            id.pos,
            0.8,
            category::NAMING,
            format!(
                "{thing} name will be used as {pkg}.{name} by other packages, and that stutters; consider calling this {rem}"
            ),
        )
        .with_link(format!("{STYLE_GUIDE_BASE}#package-names")),
    )
}
