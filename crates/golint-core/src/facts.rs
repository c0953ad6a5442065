//! Syntax facts consumed by the engine.
//!
//! These types are the read-only surface the rules query. They are produced
//! by a parser front end (see the `golint-ts` crate) or built by hand in
//! tests; the engine never parses source text itself.

use std::path::{Path, PathBuf};

/// A point in a source file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pos {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, in bytes).
    pub column: usize,
    /// Byte offset from the start of the file.
    pub offset: usize,
}

impl Pos {
    /// Creates a position without byte offset information.
    #[must_use]
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            line,
            column,
            offset: 0,
        }
    }

    /// Sets the byte offset.
    #[must_use]
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}

/// A named identifier and where it appears.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    /// Identifier text.
    pub name: String,
    /// Position of the first character.
    pub pos: Pos,
}

impl Ident {
    /// Creates a new identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, pos: Pos) -> Self {
        Self {
            name: name.into(),
            pos,
        }
    }

    /// Whether the identifier is exported (starts with an upper-case letter).
    #[must_use]
    pub fn is_exported(&self) -> bool {
        is_exported(&self.name)
    }
}

/// Reports whether `name` is exported under Go's naming convention.
#[must_use]
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// A group of adjacent comments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentGroup {
    /// Position of the first comment.
    pub pos: Pos,
    /// Line on which the last comment ends.
    pub end_line: usize,
    /// Comment text with markers stripped, as rendered by Go's `CommentGroup.Text`.
    pub text: String,
    /// Raw source lines of the group, markers included.
    pub lines: Vec<String>,
}

impl CommentGroup {
    /// Builds a group from raw comment sources (`// ...` or `/* ... */`).
    #[must_use]
    pub fn from_raw<I, S>(pos: Pos, comments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lines = Vec::new();
        for comment in comments {
            lines.extend(comment.as_ref().lines().map(str::to_owned));
        }
        let end_line = pos.line + lines.len().saturating_sub(1);
        let text = comment_text(&lines.join("\n"));
        Self {
            pos,
            end_line,
            text,
            lines,
        }
    }
}

/// Renders raw comment source the way Go's `CommentGroup.Text` does.
///
/// Comment markers, the first space of a line comment, tool directives
/// (`//go:...`, `//line ...`) and leading and trailing blank lines are
/// removed. Runs of blank lines collapse to one and trailing space is
/// trimmed. Unless empty, the result is newline-terminated.
#[must_use]
pub fn comment_text(raw: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut in_block = false;

    for line in raw.lines() {
        let trimmed = line.trim_start();
        if in_block {
            let (body, closed) = match trimmed.find("*/") {
                Some(end) => (&trimmed[..end], true),
                None => (line, false),
            };
            out.push(body.to_owned());
            in_block = !closed;
        } else if let Some(rest) = trimmed.strip_prefix("//") {
            if rest.starts_with("go:") || rest.starts_with("line ") {
                continue;
            }
            out.push(rest.strip_prefix(' ').unwrap_or(rest).to_owned());
        } else if let Some(rest) = trimmed.strip_prefix("/*") {
            match rest.find("*/") {
                Some(end) => out.push(rest[..end].to_owned()),
                None => {
                    out.push(rest.to_owned());
                    in_block = true;
                }
            }
        }
    }

    let mut lines: Vec<&str> = Vec::new();
    for line in &out {
        let line = line.trim_end();
        if line.is_empty() && lines.last().map_or(true, |l: &&str| l.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    if lines.is_empty() {
        return String::new();
    }
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// A method receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receiver {
    /// Receiver variable name, if one is declared.
    pub name: Option<Ident>,
    /// Receiver base type name when it is a plain named type,
    /// optionally behind a pointer or instantiated with type parameters.
    pub type_name: Option<String>,
}

/// A function or method declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    /// Position of the `func` keyword.
    pub pos: Pos,
    /// Function name.
    pub name: Ident,
    /// Receiver for methods.
    pub receiver: Option<Receiver>,
    /// Doc comment.
    pub doc: Option<CommentGroup>,
}

impl FuncDecl {
    /// Whether this declaration is a method.
    #[must_use]
    pub fn is_method(&self) -> bool {
        self.receiver.is_some()
    }

    /// Receiver type name, when it is a plain named type.
    #[must_use]
    pub fn receiver_type(&self) -> Option<&str> {
        self.receiver.as_ref().and_then(|r| r.type_name.as_deref())
    }
}

/// One `Name T` entry of a type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    /// Declared type name.
    pub name: Ident,
    /// Doc comment directly on the spec.
    pub doc: Option<CommentGroup>,
}

/// A `type` declaration, possibly parenthesized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    /// Position of the `type` keyword.
    pub pos: Pos,
    /// Whether the declaration uses a parenthesized block.
    pub grouped: bool,
    /// Doc comment on the whole declaration.
    pub doc: Option<CommentGroup>,
    /// Declared types.
    pub specs: Vec<TypeSpec>,
}

/// Whether a value declaration is `const` or `var`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `const`
    Const,
    /// `var`
    Var,
}

impl ValueKind {
    /// Keyword as written in source.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Const => "const",
            Self::Var => "var",
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One line of a `const`/`var` declaration: `A, b = 1, 2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueSpec {
    /// Position of the first name.
    pub pos: Pos,
    /// Declared names, in source order.
    pub names: Vec<Ident>,
    /// Doc comment directly on the spec.
    pub doc: Option<CommentGroup>,
}

/// A `const` or `var` declaration, possibly parenthesized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueDecl {
    /// `const` or `var`.
    pub kind: ValueKind,
    /// Position of the keyword.
    pub pos: Pos,
    /// Whether the declaration uses a parenthesized block.
    pub grouped: bool,
    /// Doc comment on the whole declaration.
    pub doc: Option<CommentGroup>,
    /// Specs in source order.
    pub specs: Vec<ValueSpec>,
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    /// `type ...`
    Type(TypeDecl),
    /// `func ...`
    Func(FuncDecl),
    /// `const ...` / `var ...`
    Value(ValueDecl),
}

/// One parsed source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path used in reports.
    pub path: PathBuf,
    /// Package clause name.
    pub package: Ident,
    /// Position of the `package` keyword.
    pub package_pos: Pos,
    /// Package doc comment (adjacent to the package clause).
    pub package_doc: Option<CommentGroup>,
    /// All comment groups before the package clause, in order.
    pub leading_comments: Vec<CommentGroup>,
    /// Full source text, used for line context.
    pub content: String,
    /// Top-level declarations in source order (imports excluded).
    pub decls: Vec<Decl>,
}

impl SourceFile {
    /// Creates an empty file for the given package.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, package: impl Into<String>) -> Self {
        let package_pos = Pos::new(1, 1);
        Self {
            path: path.into(),
            package: Ident::new(package, Pos::new(1, 9).with_offset(8)),
            package_pos,
            package_doc: None,
            leading_comments: Vec::new(),
            content: String::new(),
            decls: Vec::new(),
        }
    }

    /// Adds a declaration.
    #[must_use]
    pub fn with_decl(mut self, decl: Decl) -> Self {
        self.decls.push(decl);
        self
    }

    /// Sets the source text.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Adds a comment group before the package clause.
    #[must_use]
    pub fn with_leading_comment(mut self, group: CommentGroup) -> Self {
        self.leading_comments.push(group);
        self
    }

    /// Whether this is a `_test.go` file.
    #[must_use]
    pub fn is_test(&self) -> bool {
        is_test_path(&self.path)
    }

    /// Returns the given source line (1-indexed) without its terminator.
    #[must_use]
    pub fn line(&self, line: usize) -> &str {
        if line == 0 {
            return "";
        }
        self.content.lines().nth(line - 1).unwrap_or("")
    }

    /// Iterates over every method declaration.
    pub fn methods(&self) -> impl Iterator<Item = &FuncDecl> {
        self.decls.iter().filter_map(|d| match d {
            Decl::Func(f) if f.is_method() => Some(f),
            _ => None,
        })
    }
}

/// Detects `_test.go` files.
#[must_use]
pub fn is_test_path(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with("_test.go"))
}
