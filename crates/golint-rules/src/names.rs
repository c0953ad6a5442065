//! Rule to enforce Go naming conventions.
//!
//! # Detected Patterns
//!
//! - Package names with underscores or upper-case letters
//! - `ALL_CAPS` names
//! - Constants and variables with a leading `k` (`kTimeout`)
//! - Names with underscores (`max_size`)
//! - Initialisms in the wrong case (`userId`, `ServeHttp`)
//!
//! `_`, names in the known-exception table, and test, benchmark and
//! example functions in `_test.go` files are accepted.

use golint_core::facts::{Decl, Ident};
use golint_core::{category, FileContext, PassState, Problem, Rule, STYLE_GUIDE_BASE};

/// Rule name for names.
pub const NAME: &str = "names";

const EFFECTIVE_GO: &str = "https://golang.org/doc/effective_go.html";

/// Initialisms that keep a consistent case (`URL`, not `Url`).
const COMMON_INITIALISMS: &[&str] = &[
    "ACL", "API", "ASCII", "CPU", "CSS", "DNS", "EOF", "GUID", "HTML", "HTTP", "HTTPS", "ID",
    "IP", "JSON", "LHS", "QPS", "RAM", "RHS", "RPC", "SLA", "SMTP", "SQL", "SSH", "TCP", "TLS",
    "TTL", "UDP", "UI", "UID", "UUID", "URI", "URL", "UTF8", "VM", "XML", "XMPP", "XSRF", "XSS",
];

/// Function name prefixes the testing package gives meaning to.
const TEST_FUNC_PREFIXES: [&str; 3] = ["Test", "Benchmark", "Example"];

/// Checks package and top-level identifier names.
#[derive(Debug, Clone, Default)]
pub struct Names;

impl Names {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for Names {
    fn name(&self) -> &'static str {
        NAME
    }

    fn category(&self) -> &'static str {
        category::NAMING
    }

    fn description(&self) -> &'static str {
        "Enforces MixedCaps names with consistent initialisms"
    }

    fn check(&self, ctx: &FileContext<'_>, _pass: &mut PassState) -> Vec<Problem> {
        let mut problems = check_package_name(ctx);

        for (_, decl) in ctx.decls() {
            match decl {
                Decl::Type(decl) => {
                    for spec in &decl.specs {
                        problems.extend(check_ident(ctx, &spec.name, "type"));
                    }
                }
                Decl::Func(func) => {
                    let is_test_func = TEST_FUNC_PREFIXES
                        .iter()
                        .any(|prefix| func.name.name.starts_with(prefix));
                    if ctx.file.is_test() && is_test_func {
                        continue;
                    }
                    let thing = if func.is_method() { "method" } else { "func" };
                    problems.extend(check_ident(ctx, &func.name, thing));
                }
                Decl::Value(decl) => {
                    for name in decl.specs.iter().flat_map(|s| s.names.iter()) {
                        problems.extend(check_ident(ctx, name, decl.kind.keyword()));
                    }
                }
            }
        }

        problems
    }
}

fn check_package_name(ctx: &FileContext<'_>) -> Vec<Problem> {
    let pkg = ctx.package_name();
    let pos = ctx.file.package_pos;
    let link = format!("{EFFECTIVE_GO}#package-names");
    let mut problems = Vec::new();

    if pkg.contains('_') && !pkg.ends_with("_test") {
        problems.push(
            ctx.problem(pos, 1.0, category::NAMING, "don't use an underscore in package name")
                .with_link(link.clone()),
        );
    }
    if pkg.chars().any(|c| c.is_ascii_uppercase()) {
        problems.push(
            ctx.problem(
                pos,
                1.0,
                category::NAMING,
                format!(
                    "don't use MixedCaps in package name; {pkg} should be {}",
                    pkg.to_lowercase()
                ),
            )
            .with_link(link),
        );
    }

    problems
}

fn check_ident(ctx: &FileContext<'_>, id: &Ident, thing: &str) -> Vec<Problem> {
    let name = id.name.as_str();
    if name == "_" || ctx.policy.is_known_exception(name) {
        return Vec::new();
    }

    if is_all_caps(name) {
        return vec![ctx
            .problem(
                id.pos,
                0.8,
                category::NAMING,
                "don't use ALL_CAPS in Go names; use CamelCase",
            )
            .with_link(format!("{STYLE_GUIDE_BASE}#mixed-caps"))];
    }

    let mut problems = Vec::new();

    if matches!(thing, "const" | "var") {
        if let Some(should) = strip_leading_k(name) {
            problems.push(
                ctx.problem(
                    id.pos,
                    0.8,
                    category::NAMING,
                    format!("don't use leading k in Go names; {thing} {name} should be {should}"),
                )
                .with_link(format!("{STYLE_GUIDE_BASE}#mixed-caps")),
            );
        }
    }

    let should = lint_name(name);
    if should == name {
        return problems;
    }

    let line = ctx.file.line(id.pos.line);
    let problem = if name.len() > 2 && name.chars().skip(1).any(|c| c == '_') {
        ctx.problem(
            id.pos,
            0.9,
            category::NAMING,
            format!("don't use underscores in Go names; {thing} {name} should be {should}"),
        )
        .with_link(format!("{EFFECTIVE_GO}#mixed-caps"))
    } else {
        ctx.problem(
            id.pos,
            0.8,
            category::NAMING,
            format!("{thing} {name} should be {should}"),
        )
        .with_link(format!("{STYLE_GUIDE_BASE}#initialisms"))
    };
    let problem = match replace_at(line, id.pos.column, name, &should) {
        Some(replacement) => problem.with_replacement(replacement),
        None => problem,
    };
    problems.push(problem);

    problems
}

/// `MAX_SIZE`: at least five characters, upper case with an underscore.
fn is_all_caps(name: &str) -> bool {
    name.len() >= 5
        && name.contains('_')
        && name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        && name.chars().filter(char::is_ascii_uppercase).count() >= 2
}

/// `kTimeout` becomes `timeout`.
fn strip_leading_k(name: &str) -> Option<String> {
    let rest = name.strip_prefix('k')?;
    let mut chars = rest.chars();
    let first = chars.next()?;
    if !first.is_ascii_uppercase() || rest.len() < 2 {
        return None;
    }
    Some(format!("{}{}", first.to_ascii_lowercase(), chars.as_str()))
}

/// Returns the MixedCaps form of `name`, with common initialisms in
/// consistent case and underscores removed.
pub(crate) fn lint_name(name: &str) -> String {
    if name == "_" || name.chars().all(char::is_lowercase) {
        return name.to_string();
    }

    let mut runes: Vec<char> = name.chars().collect();
    let mut w = 0;
    let mut i = 0;

    while i < runes.len() {
        let mut eow = false;
        if i + 1 == runes.len() {
            eow = true;
        } else if runes[i + 1] == '_' {
            eow = true;
            let mut n = 1;
            while i + n + 1 < runes.len() && runes[i + n + 1] == '_' {
                n += 1;
            }
            // Keep one underscore between two digits.
            if i + n + 1 < runes.len() && runes[i].is_ascii_digit() && runes[i + n + 1].is_ascii_digit()
            {
                n -= 1;
            }
            runes.drain(i + 1..=i + n);
        } else if runes[i].is_lowercase() && !runes[i + 1].is_lowercase() {
            eow = true;
        }
        i += 1;
        if !eow {
            continue;
        }

        let word: String = runes[w..i].iter().collect();
        let upper = word.to_uppercase();
        if COMMON_INITIALISMS.contains(&upper.as_str()) {
            let fixed = if w == 0 && runes[w].is_lowercase() {
                word.to_lowercase()
            } else {
                upper
            };
            for (k, c) in fixed.chars().enumerate() {
                runes[w + k] = c;
            }
        } else if w > 0 && word.to_lowercase() == word {
            runes[w] = runes[w].to_uppercase().next().unwrap_or(runes[w]);
        }
        w = i;
    }

    runes.into_iter().collect()
}

/// Replaces `name` at the 1-indexed byte `column` of `line`.
fn replace_at(line: &str, column: usize, name: &str, should: &str) -> Option<String> {
    let start = column.checked_sub(1)?;
    let tail = line.get(start..)?;
    let rest = tail.strip_prefix(name)?;
    Some(format!("{}{should}{rest}", &line[..start]))
}
