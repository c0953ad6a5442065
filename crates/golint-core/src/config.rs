//! Configuration types for golint.
//!
//! ```toml
//! min_confidence = 0.8
//!
//! [policy]
//! known_name_exceptions = ["LastInsertId", "kWh"]
//! generated_markers = ['^// Code generated .* DO NOT EDIT\.$']
//!
//! [discovery]
//! exclude = ["**/vendor/**"]
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Default minimum confidence of a problem to report it.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.8;

/// Marker Go tools put at the top of generated files.
pub const DEFAULT_GENERATED_MARKER: &str = r"^// Code generated .* DO NOT EDIT\.$";

/// Names that are exempt from naming checks, usually because they must
/// match a name in the standard library.
pub const DEFAULT_KNOWN_NAME_EXCEPTIONS: &[&str] = &["LastInsertId", "kWh"];

/// Top-level configuration for golint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Minimum confidence of a problem to report it (default: 0.8).
    #[serde(default)]
    pub min_confidence: Option<f64>,

    /// Policy tables consulted by the rules.
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Source discovery settings (used by the CLI).
    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Effective minimum confidence.
    #[must_use]
    pub fn min_confidence(&self) -> f64 {
        self.min_confidence.unwrap_or(DEFAULT_MIN_CONFIDENCE)
    }
}

/// Policy tables as written in configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Identifiers exempt from naming and stutter checks.
    #[serde(default = "default_known_name_exceptions")]
    pub known_name_exceptions: Vec<String>,

    /// Regular expressions matched against each leading comment line
    /// to recognize generated files.
    #[serde(default = "default_generated_markers")]
    pub generated_markers: Vec<String>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            known_name_exceptions: default_known_name_exceptions(),
            generated_markers: default_generated_markers(),
        }
    }
}

fn default_known_name_exceptions() -> Vec<String> {
    DEFAULT_KNOWN_NAME_EXCEPTIONS
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn default_generated_markers() -> Vec<String> {
    vec![DEFAULT_GENERATED_MARKER.to_string()]
}

/// Source discovery configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Glob patterns of files to skip.
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Compiled policy tables.
#[derive(Debug, Clone)]
pub struct Policy {
    known_name_exceptions: HashSet<String>,
    generated_markers: Vec<Regex>,
}

impl Policy {
    /// Compiles the policy tables.
    ///
    /// # Errors
    ///
    /// Returns an error if a generated marker is not a valid regular expression.
    pub fn compile(config: &PolicyConfig) -> Result<Self, ConfigError> {
        let generated_markers = config
            .generated_markers
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::Pattern {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            known_name_exceptions: config.known_name_exceptions.iter().cloned().collect(),
            generated_markers,
        })
    }

    /// Whether `name` is exempt from naming checks.
    #[must_use]
    pub fn is_known_exception(&self, name: &str) -> bool {
        self.known_name_exceptions.contains(name)
    }

    /// Whether a comment line marks its file as generated.
    #[must_use]
    pub fn is_generated_marker(&self, line: &str) -> bool {
        let line = line.trim_end();
        self.generated_markers.iter().any(|re| re.is_match(line))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// Invalid generated-file marker pattern.
    #[error("Invalid generated marker pattern `{pattern}`: {message}")]
    Pattern {
        /// The offending pattern.
        pattern: String,
        /// Regex error message.
        message: String,
    },
}
