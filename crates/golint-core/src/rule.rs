//! Rule trait for defining lint checks.

use crate::context::{FileContext, PassState};
use crate::types::Problem;

/// A lint check over one file of a package.
///
/// Rules receive a [`FileContext`], which exposes the file's declarations
/// together with the package-wide facts built before evaluation. Rules must
/// not depend on each other; the order in which they run only affects the
/// order in which problems arrive at the collector.
///
/// # Example
///
/// ```ignore
/// use golint_core::{FileContext, PassState, Problem, Rule};
///
/// pub struct NoInitFuncs;
///
/// impl Rule for NoInitFuncs {
///     fn name(&self) -> &'static str { "no-init-funcs" }
///     fn category(&self) -> &'static str { "style" }
///
///     fn check(&self, ctx: &FileContext<'_>, _pass: &mut PassState) -> Vec<Problem> {
///         ctx.file.decls.iter().filter_map(|d| match d {
///             Decl::Func(f) if f.name.name == "init" => {
///                 Some(ctx.problem(f.pos, 0.5, self.category(), "avoid init functions"))
///             }
///             _ => None,
///         }).collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "exported-type-doc").
    fn name(&self) -> &'static str;

    /// Returns the category of problems this rule reports (e.g., "comments").
    fn category(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Whether the rule stays silent on generated files.
    fn skips_generated(&self) -> bool {
        true
    }

    /// Checks a single file and returns any problems found.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The file and the package-wide facts
    /// * `pass` - Bookkeeping shared by all rules of this evaluation pass
    fn check(&self, ctx: &FileContext<'_>, pass: &mut PassState) -> Vec<Problem>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
