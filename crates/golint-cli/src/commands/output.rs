//! Shared output formatting for lint results.

use anyhow::Result;
use golint_core::facts::SourceFile;
use golint_core::{LintReport, Problem, ProblemDiagnostic};
use miette::NamedSource;

use crate::OutputFormat;

/// Print lint results in the specified format.
///
/// `sources` supplies file contents for annotated snippets.
pub fn print(report: &LintReport, format: OutputFormat, sources: &[&SourceFile]) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Compact => print_compact(report),
        OutputFormat::Json => return print_json(report),
        OutputFormat::Pretty => print_pretty(report, sources),
    }
    Ok(())
}

fn print_text(report: &LintReport) {
    for problem in &report.problems {
        println!("{problem}");
    }
}

fn print_compact(report: &LintReport) {
    for problem in &report.problems {
        println!("{}", compact_line(problem));
    }
}

fn compact_line(problem: &Problem) -> String {
    format!(
        "{}:{}:{}: [{}] {} ({:.2})",
        problem.position.file.display(),
        problem.position.line,
        problem.position.column,
        problem.rule,
        problem.text,
        problem.confidence,
    )
}

fn print_json(report: &LintReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

fn print_pretty(report: &LintReport, sources: &[&SourceFile]) {
    for problem in &report.problems {
        let source = sources.iter().find(|f| f.path == problem.position.file);
        match source {
            Some(file) => {
                let diagnostic = miette::Report::new(ProblemDiagnostic::from(problem))
                    .with_source_code(NamedSource::new(
                        file.path.display().to_string(),
                        file.content.clone(),
                    ));
                println!("{diagnostic:?}");
            }
            None => println!("{}\n", problem.format()),
        }
    }

    let summary_color = if report.is_clean() {
        "\x1b[32m"
    } else {
        "\x1b[33m"
    };
    let by_category = report
        .count_by_category()
        .into_iter()
        .map(|(category, n)| format!("{n} {category}"))
        .collect::<Vec<_>>()
        .join(", ");

    eprintln!(
        "{}Found {} problem(s){} in {} file(s)\x1b[0m",
        summary_color,
        report.problems.len(),
        if by_category.is_empty() {
            String::new()
        } else {
            format!(" ({by_category})")
        },
        report.files_checked
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use golint_core::{category, Position};

    #[test]
    fn compact_line_carries_rule_and_confidence() {
        let problem = Problem::new(
            Position::new("foo/foo.go", 3, 6),
            1.0,
            category::COMMENTS,
            "exported type Foo should have comment or be unexported",
        )
        .with_rule("exported-type-doc");

        insta::assert_snapshot!(
            compact_line(&problem),
            @"foo/foo.go:3:6: [exported-type-doc] exported type Foo should have comment or be unexported (1.00)"
        );
    }
}
