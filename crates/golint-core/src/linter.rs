//! Core linter for orchestrating rule evaluation.

use crate::collector::ProblemCollector;
use crate::config::{Config, ConfigError, Policy};
use crate::context::{FileContext, PackageContext, PassState};
use crate::facts::SourceFile;
use crate::filter::{filter_with, MinConfidence};
use crate::rule::{Rule, RuleBox};
use crate::types::{LintReport, Problem};

use std::panic::{catch_unwind, AssertUnwindSafe};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors reported to the caller of the linter.
#[derive(Debug, Error)]
pub enum LintError {
    /// Minimum confidence outside (0, 1].
    #[error("minimum confidence must be in (0, 1], got {value}")]
    InvalidConfidence {
        /// The rejected value.
        value: f64,
    },

    /// Files of more than one package were passed together.
    #[error("found packages {first} and {second}; all files must belong to a single package")]
    MixedPackages {
        /// Package of the first file.
        first: String,
        /// First differing package.
        second: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Builder for configuring a [`Linter`].
#[derive(Default)]
pub struct LinterBuilder {
    rules: Vec<RuleBox>,
    policy: Option<Policy>,
    min_confidence: Option<f64>,
    config: Option<Config>,
}

impl LinterBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the linter.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the linter.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules, keeping their order.
    #[must_use]
    pub fn rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = RuleBox>,
    {
        self.rules.extend(rules);
        self
    }

    /// Sets compiled policy tables, overriding those of the configuration.
    #[must_use]
    pub fn policy(mut self, policy: Policy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Sets the minimum confidence, overriding the configuration.
    #[must_use]
    pub fn min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = Some(min_confidence);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the linter.
    ///
    /// # Errors
    ///
    /// Returns an error if the minimum confidence is outside (0, 1] or a
    /// configured policy pattern does not compile.
    pub fn build(self) -> Result<Linter, LintError> {
        let config = self.config.unwrap_or_default();

        let min_confidence = MinConfidence::new(
            self.min_confidence
                .unwrap_or_else(|| config.min_confidence()),
        )?;

        let policy = match self.policy {
            Some(policy) => policy,
            None => Policy::compile(&config.policy)?,
        };

        Ok(Linter {
            rules: self.rules,
            policy,
            min_confidence,
        })
    }
}

/// The linter that runs a rule set over one package at a time.
///
/// Use [`Linter::builder()`] to construct an instance. A `Linter` holds no
/// per-package state, so one instance may lint several packages, including
/// concurrently.
pub struct Linter {
    rules: Vec<RuleBox>,
    policy: Policy,
    min_confidence: MinConfidence,
}

impl Linter {
    /// Creates a new builder for configuring a linter.
    #[must_use]
    pub fn builder() -> LinterBuilder {
        LinterBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the minimum confidence this linter reports.
    #[must_use]
    pub fn min_confidence(&self) -> f64 {
        self.min_confidence.get()
    }

    /// Lints the files of one package and returns the filtered report.
    ///
    /// # Errors
    ///
    /// Returns [`LintError::MixedPackages`] if the files declare different packages.
    pub fn lint(&self, files: &[SourceFile]) -> Result<LintReport, LintError> {
        let problems = self.lint_unfiltered(files)?;
        let total = problems.len();
        let problems = filter_with(problems, self.min_confidence);

        info!(
            "Lint complete: {} of {} problem(s) at confidence >= {} in {} file(s)",
            problems.len(),
            total,
            self.min_confidence.get(),
            files.len()
        );

        Ok(LintReport {
            problems,
            files_checked: files.len(),
        })
    }

    /// Lints the files of one package without confidence filtering.
    ///
    /// # Errors
    ///
    /// Returns [`LintError::MixedPackages`] if the files declare different packages.
    pub fn lint_unfiltered(&self, files: &[SourceFile]) -> Result<Vec<Problem>, LintError> {
        check_single_package(files)?;

        // Phase one: package-wide facts.
        let package = PackageContext::build(files, &self.policy);

        // Phase two: rule evaluation.
        let mut pass = PassState::new();
        let mut collector = ProblemCollector::new();

        for (index, file) in files.iter().enumerate() {
            let ctx = FileContext::new(file, index, &package, &self.policy);
            debug!("Linting: {}", file.path.display());

            for rule in &self.rules {
                if rule.skips_generated() && ctx.is_generated() {
                    debug!("Skipping {} on generated file", rule.name());
                    continue;
                }
                collector.extend(run_rule(rule.as_ref(), &ctx, &mut pass));
            }
        }

        Ok(collector.finish())
    }
}

/// Runs one rule on one file, isolating panics.
fn run_rule(rule: &dyn Rule, ctx: &FileContext<'_>, pass: &mut PassState) -> Vec<Problem> {
    match catch_unwind(AssertUnwindSafe(|| rule.check(ctx, pass))) {
        Ok(problems) => problems
            .into_iter()
            .map(|p| p.with_rule(rule.name()))
            .collect(),
        Err(_) => {
            warn!(
                "Rule {} panicked on {}; skipping its results",
                rule.name(),
                ctx.path().display()
            );
            Vec::new()
        }
    }
}

fn check_single_package(files: &[SourceFile]) -> Result<(), LintError> {
    let Some(first) = files.first() else {
        return Ok(());
    };
    match files
        .iter()
        .find(|f| f.package.name != first.package.name)
    {
        Some(other) => Err(LintError::MixedPackages {
            first: first.package.name.clone(),
            second: other.package.name.clone(),
        }),
        None => Ok(()),
    }
}
