//! Configuration file lookup.
//!
//! Priority order:
//!
//! 1. `--config` flag (or `GOLINT_CONFIG`)
//! 2. `golint.toml` or `.golint.toml` in the target directory or one of its
//!    ancestors, stopping at the Go module root (the directory with `go.mod`)
//! 3. `~/.golint/config.toml`
//! 4. built-in defaults

use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given on the command line.
    Explicit(PathBuf),
    /// Found next to the sources or in an enclosing directory.
    Project(PathBuf),
    /// Found in the user's global config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` if the config came from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

/// Project config file names, checked in order within each directory.
const PROJECT_CONFIG_NAMES: &[&str] = &["golint.toml", ".golint.toml"];

/// Marks the root of a Go module; the upward search stops there.
const MODULE_FILE: &str = "go.mod";

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration file for sources under `start_dir`.
#[must_use]
pub fn resolve(start_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(start_dir, explicit, global_config_dir())
}

fn resolve_inner(
    start_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = find_project_config(start_dir) {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    if let Some(dir) = global_dir {
        let candidate = dir.join(GLOBAL_CONFIG_NAME);
        if candidate.exists() {
            tracing::debug!("Found global config: {}", candidate.display());
            return ConfigSource::Global(candidate);
        }
    }

    ConfigSource::Default
}

fn find_project_config(start_dir: &Path) -> Option<PathBuf> {
    // Relative paths like "." have no ancestors to walk.
    let start = start_dir
        .canonicalize()
        .unwrap_or_else(|_| start_dir.to_path_buf());

    for dir in start.ancestors() {
        for name in PROJECT_CONFIG_NAMES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        if dir.join(MODULE_FILE).is_file() {
            break;
        }
    }
    None
}

/// Returns the global config directory: `$GOLINT_CONFIG_DIR`, else
/// `~/.golint/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("GOLINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".golint"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn canonical(tmp: &TempDir) -> PathBuf {
        tmp.path().canonicalize().unwrap()
    }

    #[test]
    fn explicit_wins_without_existence_check() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("golint.toml"), "").unwrap();

        let result = resolve_inner(tmp.path(), Some(Path::new("/nonexistent.toml")), None);
        assert_eq!(
            result,
            ConfigSource::Explicit(PathBuf::from("/nonexistent.toml"))
        );
    }

    #[test]
    fn plain_name_preferred_over_dot_prefix() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("golint.toml"), "").unwrap();
        fs::write(tmp.path().join(".golint.toml"), "").unwrap();

        let result = resolve_inner(tmp.path(), None, None);
        assert_eq!(
            result,
            ConfigSource::Project(canonical(&tmp).join("golint.toml"))
        );
    }

    #[test]
    fn config_found_in_enclosing_directory() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".golint.toml"), "").unwrap();
        let pkg = tmp.path().join("internal/store");
        fs::create_dir_all(&pkg).unwrap();

        let result = resolve_inner(&pkg, None, None);
        assert_eq!(
            result,
            ConfigSource::Project(canonical(&tmp).join(".golint.toml"))
        );
    }

    #[test]
    fn search_stops_at_module_root() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("golint.toml"), "").unwrap();
        let module = tmp.path().join("module");
        fs::create_dir_all(module.join("pkg")).unwrap();
        fs::write(module.join("go.mod"), "module example.com/m\n").unwrap();

        let result = resolve_inner(&module.join("pkg"), None, None);
        assert_eq!(result, ConfigSource::Default);
    }

    #[test]
    fn global_fallback_when_no_project_config() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("go.mod"), "").unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "").unwrap();

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(
            result,
            ConfigSource::Global(global.path().join("config.toml"))
        );
        assert!(result.is_global());
    }

    #[test]
    fn project_config_beats_global() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("golint.toml"), "").unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "").unwrap();

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert!(matches!(result, ConfigSource::Project(_)));
    }

    #[test]
    fn default_has_no_path() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("go.mod"), "").unwrap();
        let global = TempDir::new().unwrap();

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(result, ConfigSource::Default);
        assert!(result.path().is_none());
    }
}
