//! Check command implementation.

use anyhow::{Context, Result};
use golint_core::facts::SourceFile;
use golint_core::{Config, LintReport, Linter};
use golint_rules::default_rules;
use rayon::prelude::*;
use std::path::PathBuf;

use crate::config_resolver::ConfigSource;
use crate::discovery::{self, Targets};
use crate::OutputFormat;

/// Exit status for command-line usage errors.
const USAGE_EXIT_STATUS: i32 = 2;

/// Arguments of the check command.
#[derive(Debug, Clone)]
pub struct CheckArgs {
    /// Directories, files or import paths.
    pub paths: Vec<String>,
    /// Overrides the configured minimum confidence.
    pub min_confidence: Option<f64>,
    /// Exit with status 1 when problems are found.
    pub set_exit_status: bool,
    /// Output format.
    pub format: OutputFormat,
}

/// Runs the check command.
pub fn run(args: &CheckArgs, source: &ConfigSource) -> Result<()> {
    let config = load_config(source)?;
    let excludes = discovery::compile_excludes(&config.discovery.exclude)?;

    let mut builder = Linter::builder()
        .rules(default_rules())
        .config(config);
    if let Some(min_confidence) = args.min_confidence {
        builder = builder.min_confidence(min_confidence);
    }
    let linter = builder.build().context("Failed to build linter")?;

    let Some(targets) = discovery::classify(&args.paths) else {
        eprintln!("golint: directory, file and import path arguments cannot be mixed");
        eprintln!("Usage:");
        eprintln!("\tgolint check [flags] # runs on package in current directory");
        eprintln!("\tgolint check [flags] [directories] # where a '/...' suffix includes all sub-directories");
        eprintln!("\tgolint check [flags] [files] # all must belong to a single package");
        std::process::exit(USAGE_EXIT_STATUS);
    };

    let packages = collect_packages(targets, &excludes)?;
    let files: usize = packages.iter().map(Vec::len).sum();
    tracing::info!(
        "Linting {} package(s), {} file(s) with {} rules",
        packages.len(),
        files,
        linter.rule_count()
    );

    let reports: Vec<Result<LintReport, _>> =
        packages.par_iter().map(|files| linter.lint(files)).collect();

    let mut report = LintReport::new();
    for (files, result) in packages.iter().zip(reports) {
        let package = files.first().map_or("", |f| f.package.name.as_str());
        report.extend(result.with_context(|| format!("Failed to lint package {package}"))?);
    }

    let sources: Vec<&SourceFile> = packages.iter().flatten().collect();
    super::output::print(&report, args.format, &sources)?;

    if args.set_exit_status && !report.is_clean() {
        eprintln!(
            "Found {} lint suggestions; failing.",
            report.problems.len()
        );
        std::process::exit(1);
    }

    Ok(())
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    match source {
        ConfigSource::Default => Ok(Config::default()),
        other => {
            // Invariant: non-Default variants always have a path
            let p = other.path().context("resolved config has no path")?;
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            Config::from_file(p).with_context(|| format!("Failed to load config: {}", p.display()))
        }
    }
}

/// Turns targets into parsed packages.
fn collect_packages(
    targets: Targets,
    excludes: &[glob::Pattern],
) -> Result<Vec<Vec<SourceFile>>> {
    let keep = |paths: Vec<PathBuf>| -> Vec<PathBuf> {
        paths
            .into_iter()
            .filter(|p| {
                let excluded = discovery::is_excluded(p, excludes);
                if excluded {
                    tracing::debug!("Excluded: {}", p.display());
                }
                !excluded
            })
            .collect()
    };

    match targets {
        Targets::Dirs(dirs) => {
            let mut packages = Vec::new();
            for dir in dirs {
                let files = discovery::load(&keep(discovery::go_files_in(&dir)?))?;
                packages.extend(discovery::group_packages(files));
            }
            Ok(packages)
        }
        Targets::Files(paths) => {
            // Explicit files form one package; mixed packages are an error.
            let files = discovery::load(&keep(paths))?;
            Ok(if files.is_empty() { Vec::new() } else { vec![files] })
        }
        Targets::ImportPaths(paths) => {
            for path in &paths {
                tracing::warn!("cannot find package \"{path}\"; pass its directory instead");
            }
            Ok(Vec::new())
        }
    }
}
