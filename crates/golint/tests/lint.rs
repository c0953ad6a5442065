//! Integration tests: Go source end-to-end through `golint::lint`.
//!
//! Sources are parsed with the tree-sitter front end, so these tests cover
//! extraction, package context, the default rules, collection and
//! filtering together.

use golint::facts::SourceFile;
use golint::rules::ExportedTypeDoc;
use golint::{GoExtractor, LanguageExtractor, LintError, Linter, Problem};
use std::path::{Path, PathBuf};

fn parse(path: &str, code: &str) -> SourceFile {
    GoExtractor::new()
        .extract(Path::new(path), code)
        .expect("source should parse")
}

fn fixture_package() -> Vec<SourceFile> {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/widget");
    let mut names: Vec<String> = std::fs::read_dir(&root)
        .expect("fixture dir should exist")
        .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();

    let extractor = GoExtractor::new();
    names
        .iter()
        .map(|name| {
            let code = std::fs::read_to_string(root.join(name)).expect("fixture should read");
            extractor
                .extract(&Path::new("widget").join(name), &code)
                .expect("fixture should parse")
        })
        .collect()
}

fn texts(problems: &[Problem]) -> Vec<&str> {
    problems.iter().map(|p| p.text.as_str()).collect()
}

fn render(problems: &[Problem]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Scenarios ──

#[test]
fn missing_type_doc_is_the_only_problem() {
    let files = [parse("foo/foo.go", "package foo\n\ntype Foo struct{}\n")];
    let problems = golint::lint(&files, None).expect("lint should succeed");

    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].category, "comments");
    assert!((problems[0].confidence - 1.0).abs() < f64::EPSILON);
    assert_eq!(
        problems[0].text,
        "exported type Foo should have comment or be unexported"
    );
}

#[test]
fn function_doc_must_start_with_name() {
    let files = [parse(
        "foo/foo.go",
        "// Package foo does things.\npackage foo\n\n// Does something.\nfunc FooBar() {}\n",
    )];
    let problems = golint::lint(&files, None).expect("lint should succeed");

    let comments: Vec<&Problem> = problems.iter().filter(|p| p.category == "comments").collect();
    assert_eq!(comments.len(), 1);
    assert!(comments[0].text.contains("\"FooBar ...\""));
}

#[test]
fn stutter_is_reported_at_heuristic_confidence() {
    let files = [parse(
        "foo/foo.go",
        "// Package foo does things.\npackage foo\n\n// FooWidget is a widget.\ntype FooWidget struct{}\n\n// Foo is the package type.\ntype Foo struct{}\n",
    )];
    let problems = golint::lint(&files, None).expect("lint should succeed");

    assert_eq!(problems.len(), 1);
    assert!((problems[0].confidence - 0.8).abs() < f64::EPSILON);
    assert!(problems[0].text.contains("foo.FooWidget"));
}

#[test]
fn sortable_type_split_across_files_is_exempt() {
    let files = [
        parse(
            "foo/a.go",
            "// Package foo sorts.\npackage foo\n\n// ByAge sorts by age.\ntype ByAge []int\n\nfunc (a ByAge) Len() int { return len(a) }\n",
        ),
        parse(
            "foo/b.go",
            "package foo\n\nfunc (a ByAge) Less(i, j int) bool { return a[i] < a[j] }\nfunc (a ByAge) Swap(i, j int) {}\n",
        ),
    ];
    assert!(golint::lint(&files, None).expect("lint should succeed").is_empty());
}

#[test]
fn type_without_less_is_not_sortable() {
    let files = [parse(
        "foo/a.go",
        "// Package foo sorts.\npackage foo\n\n// ByAge sorts by age.\ntype ByAge []int\n\nfunc (a ByAge) Len() int { return len(a) }\nfunc (a ByAge) Swap(i, j int) {}\n",
    )];
    let problems = golint::lint(&files, None).expect("lint should succeed");
    assert_eq!(
        texts(&problems),
        [
            "exported method ByAge.Len should have comment or be unexported",
            "exported method ByAge.Swap should have comment or be unexported",
        ]
    );
}

#[test]
fn generated_package_is_silent() {
    let files = [
        parse(
            "foo/a.go",
            "// Code generated by protoc-gen-go. DO NOT EDIT.\n\npackage foo\n\ntype Foo_Bar struct{}\n",
        ),
        parse(
            "foo/b.go",
            "// Code generated by protoc-gen-go. DO NOT EDIT.\n\npackage foo\n\nfunc (this Foo_Bar) X() {}\n",
        ),
    ];
    let problems = golint::lint(&files, Some(0.01)).expect("lint should succeed");
    assert!(problems.is_empty(), "{problems:#?}");
}

#[test]
fn doc_after_trailing_comment_is_recognized() {
    let files = [parse(
        "foo/foo.go",
        "// Package foo does things.\npackage foo\n\nvar x = 1 // trailing note\n// Foo is a thing.\ntype Foo int\n",
    )];
    let problems = golint::lint(&files, None).expect("lint should succeed");
    assert!(problems.is_empty(), "{problems:#?}");
}

// ── Engine properties ──

#[test]
fn lint_is_idempotent() {
    let files = fixture_package();
    let first = golint::lint(&files, Some(0.1)).expect("lint should succeed");
    let second = golint::lint(&files, Some(0.1)).expect("lint should succeed");
    assert_eq!(first, second);
}

#[test]
fn identical_reports_from_two_rules_collapse() {
    let files = [parse("foo/foo.go", "package foo\n\ntype Foo struct{}\n")];
    let linter = Linter::builder()
        .rule(ExportedTypeDoc::new())
        .rule(ExportedTypeDoc::new())
        .build()
        .expect("linter should build");
    assert_eq!(linter.lint(&files).expect("lint").problems.len(), 1);
}

#[test]
fn strict_threshold_keeps_only_certain_problems() {
    let files = [parse(
        "foo/foo.go",
        "package foo\n\ntype Foo struct{}\n\n// FooWidget is a widget.\ntype FooWidget struct{}\n",
    )];
    let all = golint::lint(&files, Some(0.1)).expect("lint should succeed");
    let strict = golint::lint(&files, Some(1.0)).expect("lint should succeed");

    assert!(strict.iter().all(|p| all.contains(p)));
    assert!(strict.iter().all(|p| (p.confidence - 1.0).abs() < f64::EPSILON));
    assert_eq!(
        texts(&strict),
        ["exported type Foo should have comment or be unexported"]
    );
    assert!(all.iter().any(|p| p.text.contains("stutters")));
}

#[test]
fn invalid_confidence_is_rejected() {
    for bad in [0.0, -0.5, 1.01, f64::NAN] {
        assert!(matches!(
            golint::lint(&[], Some(bad)),
            Err(LintError::InvalidConfidence { .. })
        ));
    }
}

#[test]
fn mixed_packages_are_rejected() {
    let files = [
        parse("a/a.go", "package a\n"),
        parse("b/b.go", "package b\n"),
    ];
    assert!(matches!(
        golint::lint(&files, None),
        Err(LintError::MixedPackages { .. })
    ));
}

// ── Fixture package ──

#[test]
fn fixture_package_report() {
    let problems = golint::lint(&fixture_package(), None).expect("lint should succeed");
    insta::assert_snapshot!(render(&problems), @r"
    widget/widget.go:5:6: type name will be used as widget.WidgetFactory by other packages, and that stutters; consider calling this Factory
    widget/widget.go:7:1: exported method WidgetFactory.Build should have comment or be unexported
    widget/widget.go:9:5: var userId should be userID
    ");
}

#[test]
fn fixture_problems_carry_context() {
    let problems = golint::lint(&fixture_package(), None).expect("lint should succeed");
    let initialism = problems
        .iter()
        .find(|p| p.rule == "names")
        .expect("names problem");
    assert_eq!(initialism.line_text, "var userId = 1");
    assert_eq!(initialism.replacement_line.as_deref(), Some("var userID = 1"));
    assert_eq!(
        initialism.link.as_deref(),
        Some("https://golang.org/wiki/CodeReviewComments#initialisms")
    );
}
