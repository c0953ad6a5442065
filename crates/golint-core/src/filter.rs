//! Confidence threshold filtering.

use crate::config::DEFAULT_MIN_CONFIDENCE;
use crate::linter::LintError;
use crate::types::Problem;

/// A validated minimum confidence in (0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct MinConfidence(f64);

impl MinConfidence {
    /// Validates a threshold.
    ///
    /// # Errors
    ///
    /// Returns [`LintError::InvalidConfidence`] if `value` is not in (0, 1].
    pub fn new(value: f64) -> Result<Self, LintError> {
        if value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(LintError::InvalidConfidence { value })
        }
    }

    /// The threshold value.
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Whether `problem` meets the threshold.
    #[must_use]
    pub fn admits(self, problem: &Problem) -> bool {
        problem.confidence >= self.0
    }
}

impl Default for MinConfidence {
    fn default() -> Self {
        Self(DEFAULT_MIN_CONFIDENCE)
    }
}

impl TryFrom<f64> for MinConfidence {
    type Error = LintError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Keeps the problems whose confidence is at least `min_confidence`, in order.
///
/// # Errors
///
/// Returns [`LintError::InvalidConfidence`] if `min_confidence` is not in (0, 1].
pub fn filter(problems: Vec<Problem>, min_confidence: f64) -> Result<Vec<Problem>, LintError> {
    let min = MinConfidence::new(min_confidence)?;
    Ok(filter_with(problems, min))
}

/// Infallible variant of [`filter`] for an already validated threshold.
#[must_use]
pub fn filter_with(problems: Vec<Problem>, min: MinConfidence) -> Vec<Problem> {
    problems.into_iter().filter(|p| min.admits(p)).collect()
}
