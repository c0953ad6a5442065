//! Source discovery: command-line targets to Go files grouped by package.
//!
//! Targets come in three kinds, which may not be mixed:
//!
//! - directories, where a `/...` suffix includes every sub-directory
//! - files, which must all belong to a single package
//! - import paths, for anything that does not exist on disk

use anyhow::{Context, Result};
use glob::Pattern;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use golint_core::facts::SourceFile;
use golint_ts::{GoExtractor, LanguageExtractor};

/// Suffix that makes a directory target recursive.
const RECURSIVE_SUFFIX: &str = "/...";

/// Directory names never descended into by `/...`.
const SKIPPED_DIRS: &[&str] = &["vendor", "testdata"];

/// Classified command-line targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Targets {
    /// Package directories, each linted on its own.
    Dirs(Vec<PathBuf>),
    /// Files linted together as one package.
    Files(Vec<PathBuf>),
    /// Import paths that could not be found on disk.
    ImportPaths(Vec<String>),
}

/// Classifies command-line arguments.
///
/// Returns `None` if the arguments mix kinds. No arguments means the
/// current directory.
#[must_use]
pub fn classify(args: &[String]) -> Option<Targets> {
    if args.is_empty() {
        return Some(Targets::Dirs(vec![PathBuf::from(".")]));
    }

    let mut dirs = Vec::new();
    let mut files = Vec::new();
    let mut imports = Vec::new();

    for arg in args {
        if let Some(root) = arg.strip_suffix(RECURSIVE_SUFFIX) {
            if Path::new(root).is_dir() {
                dirs.extend(package_dirs(Path::new(root)));
                continue;
            }
        }
        let path = Path::new(arg);
        if path.is_dir() {
            dirs.push(path.to_path_buf());
        } else if path.exists() {
            files.push(path.to_path_buf());
        } else {
            imports.push(arg.clone());
        }
    }

    let kinds = [!dirs.is_empty(), !files.is_empty(), !imports.is_empty()];
    match kinds {
        [true, false, false] => Some(Targets::Dirs(dirs)),
        [false, true, false] => Some(Targets::Files(files)),
        [false, false, true] => Some(Targets::ImportPaths(imports)),
        // A `/...` root without packages still counts as a directory target.
        [false, false, false] => Some(Targets::Dirs(Vec::new())),
        _ => None,
    }
}

/// Directory used to look up project configuration for `args`.
#[must_use]
pub fn config_root(args: &[String]) -> PathBuf {
    let Some(first) = args.first() else {
        return PathBuf::from(".");
    };
    let first = first.strip_suffix(RECURSIVE_SUFFIX).unwrap_or(first);
    let path = Path::new(first);
    if path.is_dir() {
        path.to_path_buf()
    } else {
        path.parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    }
}

/// Every directory under `root` (inclusive) that contains Go files.
#[must_use]
pub fn package_dirs(root: &Path) -> Vec<PathBuf> {
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_type().is_dir() || !is_skipped_dir(e.path()));

    let mut dirs = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {e}");
                continue;
            }
        };
        if entry.file_type().is_file() && is_go_file(entry.path()) {
            if let Some(parent) = entry.path().parent() {
                if !dirs.iter().any(|d| d == parent) {
                    dirs.push(parent.to_path_buf());
                }
            }
        }
    }
    dirs
}

fn is_skipped_dir(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.starts_with('.') || name.starts_with('_') || SKIPPED_DIRS.contains(&name)
}

fn is_go_file(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "go")
}

/// Go files directly inside `dir`, sorted by name.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn go_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && is_go_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Compiles exclude patterns from configuration.
///
/// # Errors
///
/// Returns an error if a pattern is not a valid glob.
pub fn compile_excludes(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| Pattern::new(p).with_context(|| format!("Invalid exclude pattern: {p}")))
        .collect()
}

/// Whether `path` matches any exclude pattern.
#[must_use]
pub fn is_excluded(path: &Path, excludes: &[Pattern]) -> bool {
    let path = path.strip_prefix(".").unwrap_or(path);
    excludes.iter().any(|p| p.matches_path(path))
}

/// Reads and parses `paths`, skipping files that fail to parse.
///
/// # Errors
///
/// Returns an error if a file cannot be read.
pub fn load(paths: &[PathBuf]) -> Result<Vec<SourceFile>> {
    let extractor = GoExtractor::new();
    let mut files = Vec::with_capacity(paths.len());

    for path in paths {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        match extractor.extract(path, &source) {
            Ok(file) => files.push(file),
            Err(e) => tracing::warn!("Skipping {}: {e}", path.display()),
        }
    }

    Ok(files)
}

/// Groups files by directory and package name, in path order.
#[must_use]
pub fn group_packages(files: Vec<SourceFile>) -> Vec<Vec<SourceFile>> {
    let mut packages: BTreeMap<(PathBuf, String), Vec<SourceFile>> = BTreeMap::new();
    for file in files {
        let dir = file.path.parent().map(Path::to_path_buf).unwrap_or_default();
        packages
            .entry((dir, file.package.name.clone()))
            .or_default()
            .push(file);
    }
    packages.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn arg(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn no_args_means_current_dir() {
        assert_eq!(classify(&[]), Some(Targets::Dirs(vec![PathBuf::from(".")])));
    }

    #[test]
    fn classifies_each_kind() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.go", "package a\n");

        assert_eq!(
            classify(&[arg(tmp.path())]),
            Some(Targets::Dirs(vec![tmp.path().to_path_buf()]))
        );
        assert_eq!(
            classify(&[arg(&tmp.path().join("a.go"))]),
            Some(Targets::Files(vec![tmp.path().join("a.go")]))
        );
        assert_eq!(
            classify(&["example.com/missing/pkg".to_string()]),
            Some(Targets::ImportPaths(vec!["example.com/missing/pkg".to_string()]))
        );
    }

    #[test]
    fn mixing_kinds_is_rejected() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.go", "package a\n");

        assert_eq!(
            classify(&[arg(tmp.path()), arg(&tmp.path().join("a.go"))]),
            None
        );
        assert_eq!(
            classify(&[arg(&tmp.path().join("a.go")), "example.com/pkg".to_string()]),
            None
        );
    }

    #[test]
    fn recursive_expansion_skips_special_dirs() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.go", "package a\n");
        write(tmp.path(), "sub/b.go", "package b\n");
        write(tmp.path(), "sub/deeper/c.go", "package c\n");
        write(tmp.path(), "vendor/v/v.go", "package v\n");
        write(tmp.path(), "testdata/t.go", "package t\n");
        write(tmp.path(), ".hidden/h.go", "package h\n");
        write(tmp.path(), "_build/x.go", "package x\n");
        write(tmp.path(), "docs/readme.md", "");

        let dirs = package_dirs(tmp.path());
        assert_eq!(
            dirs,
            [
                tmp.path().to_path_buf(),
                tmp.path().join("sub"),
                tmp.path().join("sub/deeper"),
            ]
        );

        let recursive = format!("{}/...", tmp.path().display());
        assert_eq!(classify(&[recursive]), Some(Targets::Dirs(dirs)));
    }

    #[test]
    fn go_files_are_sorted() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "b.go", "package a\n");
        write(tmp.path(), "a.go", "package a\n");
        write(tmp.path(), "notes.txt", "");

        let files = go_files_in(tmp.path()).unwrap();
        assert_eq!(files, [tmp.path().join("a.go"), tmp.path().join("b.go")]);
    }

    #[test]
    fn excludes_match_relative_paths() {
        let excludes = compile_excludes(&["**/mocks/**".to_string(), "gen_*.go".to_string()]).unwrap();
        assert!(is_excluded(Path::new("./pkg/mocks/m.go"), &excludes));
        assert!(is_excluded(Path::new("gen_types.go"), &excludes));
        assert!(!is_excluded(Path::new("pkg/types.go"), &excludes));
        assert!(compile_excludes(&["[".to_string()]).is_err());
    }

    #[test]
    fn load_skips_unparsable_files() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "good.go", "package a\n");
        write(tmp.path(), "bad.go", "package a\n\nfunc {\n");

        let files = load(&[tmp.path().join("bad.go"), tmp.path().join("good.go")]).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, tmp.path().join("good.go"));
    }

    #[test]
    fn groups_by_dir_and_package() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.go", "package a\n");
        write(tmp.path(), "a_test.go", "package a_test\n");
        write(tmp.path(), "b.go", "package a\n");

        let files = load(&go_files_in(tmp.path()).unwrap()).unwrap();
        let packages = group_packages(files);
        let names: Vec<(usize, &str)> = packages
            .iter()
            .map(|p| (p.len(), p[0].package.name.as_str()))
            .collect();
        assert_eq!(names, [(2, "a"), (1, "a_test")]);
    }

    #[test]
    fn config_root_follows_first_arg() {
        assert_eq!(config_root(&[]), PathBuf::from("."));
        assert_eq!(config_root(&["main.go".to_string()]), PathBuf::from("."));
        let tmp = TempDir::new().unwrap();
        assert_eq!(
            config_root(&[format!("{}/...", tmp.path().display())]),
            tmp.path().to_path_buf()
        );
    }
}
