//! Problem aggregation across rules and files.

use crate::types::Problem;
use std::collections::HashSet;

/// Accumulates problems from every rule and file of one package.
///
/// Problems may arrive in any order. [`ProblemCollector::finish`] orders
/// them by file, line and column, keeps arrival order for ties, and drops
/// later duplicates (same position and same text). Confidence is not
/// considered here; see [`crate::filter`].
#[derive(Debug, Default)]
pub struct ProblemCollector {
    problems: Vec<Problem>,
}

impl ProblemCollector {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one problem.
    pub fn push(&mut self, problem: Problem) {
        self.problems.push(problem);
    }

    /// Number of problems collected so far, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.problems.len()
    }

    /// Whether nothing has been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    /// Returns the ordered, deduplicated problems.
    #[must_use]
    pub fn finish(mut self) -> Vec<Problem> {
        // `sort_by` is stable, so ties keep arrival order.
        self.problems.sort_by(|a, b| {
            a.position
                .file
                .cmp(&b.position.file)
                .then(a.position.line.cmp(&b.position.line))
                .then(a.position.column.cmp(&b.position.column))
        });

        let mut seen = HashSet::new();
        self.problems
            .into_iter()
            .filter(|p| seen.insert((p.position.clone(), p.text.clone())))
            .collect()
    }
}

impl Extend<Problem> for ProblemCollector {
    fn extend<T: IntoIterator<Item = Problem>>(&mut self, iter: T) {
        self.problems.extend(iter);
    }
}
