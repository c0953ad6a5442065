//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const CONFIG_FILE: &str = "golint.toml";

const DEFAULT_CONFIG: &str = r#"# golint configuration

# Problems below this confidence are not reported, in (0, 1].
min_confidence = 0.8

[policy]
# Identifiers exempt from naming and stutter checks.
known_name_exceptions = ["LastInsertId", "kWh"]

# Leading comment lines matching any of these mark a file as generated.
generated_markers = ['^// Code generated .* DO NOT EDIT\.$']

[discovery]
# Glob patterns of files to skip.
exclude = [
    # "**/mocks/**",
]
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new(CONFIG_FILE), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to adjust the policy");
    println!("  2. Run: golint check ./...");

    Ok(())
}

fn write_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }
    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))
}
