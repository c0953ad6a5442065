//! List rules command implementation.

use golint_rules::default_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<20} {:<10} Description", "Name", "Category");
    println!("{}", "-".repeat(80));

    for rule in default_rules() {
        println!(
            "{:<20} {:<10} {}",
            rule.name(),
            rule.category(),
            rule.description()
        );
    }

    println!("\nProblems below the minimum confidence are hidden, e.g.:");
    println!("  golint check --min-confidence 0.3 ./...");
}
