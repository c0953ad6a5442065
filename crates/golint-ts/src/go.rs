//! Go language extractor using Tree-sitter.

use std::path::Path;
use tree_sitter::{Language, Node, Parser};

use golint_core::facts::{
    CommentGroup, Decl, FuncDecl, Ident, Pos, Receiver, SourceFile, TypeDecl, TypeSpec,
    ValueDecl, ValueKind, ValueSpec,
};

use crate::extractor::{ExtractError, LanguageExtractor};

/// Extracts package, declaration and doc comment facts from Go source.
pub struct GoExtractor {
    language: Language,
}

impl GoExtractor {
    /// Creates a new Go extractor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_go::LANGUAGE.into(),
        }
    }
}

impl Default for GoExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageExtractor for GoExtractor {
    fn language_id(&self) -> &'static str {
        "go"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".go"]
    }

    fn extract(&self, path: &Path, source: &str) -> Result<SourceFile, ExtractError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ExtractError::Language {
                language: "go",
                message: e.to_string(),
            })?;

        let src = source.as_bytes();
        let tree = parser.parse(src, None).ok_or_else(|| ExtractError::Parse {
            path: path.to_path_buf(),
        })?;
        let root = tree.root_node();

        if root.has_error() {
            let at = first_error(root).map_or(Pos::new(1, 1), |n| pos(&n));
            return Err(ExtractError::Syntax {
                path: path.to_path_buf(),
                line: at.line,
                column: at.column,
            });
        }

        let mut package = None;
        let mut package_pos = Pos::default();
        let mut package_doc = None;
        let mut leading_comments = Vec::new();
        let mut decls = Vec::new();
        let mut docs = DocTracker::default();

        let mut cursor = root.walk();
        let children: Vec<Node<'_>> = root.children(&mut cursor).collect();

        for node in children {
            match node.kind() {
                "comment" => docs.comment(node),
                "package_clause" => {
                    leading_comments = docs.groups(src);
                    package_doc = docs.code(&node, src);
                    package_pos = pos(&node);
                    package = named_children(&node)
                        .into_iter()
                        .find(|c| c.kind() == "package_identifier")
                        .map(|c| ident(&c, src));
                }
                "function_declaration" | "method_declaration" => {
                    let doc = docs.code(&node, src);
                    if let Some(func) = extract_func(&node, src, doc) {
                        decls.push(Decl::Func(func));
                    }
                }
                "type_declaration" => {
                    let doc = docs.code(&node, src);
                    decls.push(Decl::Type(extract_type_decl(&node, src, doc)));
                }
                "const_declaration" => {
                    let doc = docs.code(&node, src);
                    decls.push(Decl::Value(extract_value_decl(
                        &node,
                        src,
                        doc,
                        ValueKind::Const,
                    )));
                }
                "var_declaration" => {
                    let doc = docs.code(&node, src);
                    decls.push(Decl::Value(extract_value_decl(
                        &node,
                        src,
                        doc,
                        ValueKind::Var,
                    )));
                }
                _ if node.is_named() => {
                    docs.code(&node, src);
                }
                _ => docs.token(&node),
            }
        }

        let package = package.ok_or_else(|| ExtractError::MissingPackage {
            path: path.to_path_buf(),
        })?;

        tracing::debug!(
            "Extracted {} declaration(s) from {}",
            decls.len(),
            path.display()
        );

        Ok(SourceFile {
            path: path.to_path_buf(),
            package,
            package_pos,
            package_doc,
            leading_comments,
            content: source.to_owned(),
            decls,
        })
    }
}

fn pos(node: &Node<'_>) -> Pos {
    let p = node.start_position();
    Pos::new(p.row + 1, p.column + 1).with_offset(node.start_byte())
}

fn text<'a>(node: &Node<'_>, src: &'a [u8]) -> &'a str {
    node.utf8_text(src).unwrap_or("")
}

fn ident(node: &Node<'_>, src: &[u8]) -> Ident {
    Ident::new(text(node, src), pos(node))
}

fn named_children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

fn all_children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

fn first_error<'t>(node: Node<'t>) -> Option<Node<'t>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    all_children(&node).into_iter().find_map(first_error)
}

/// Groups comments and decides which group documents the next node.
///
/// A group is a run of comments on adjacent lines. It documents a node when
/// its last comment ends on the line just before the node, and it did not
/// start on the same line as preceding code.
#[derive(Default)]
struct DocTracker<'t> {
    done: Vec<Vec<Node<'t>>>,
    pending: Vec<Node<'t>>,
    trailing: bool,
    last_code_row: Option<usize>,
}

impl<'t> DocTracker<'t> {
    fn comment(&mut self, node: Node<'t>) {
        let row = node.start_position().row;
        let Some(last_row) = self.pending.last().map(|last| last.end_position().row) else {
            self.trailing = self.last_code_row == Some(row);
            self.pending.push(node);
            return;
        };
        // A trailing group only spans the line of its code.
        let adjacent = if self.trailing {
            row == last_row
        } else {
            row <= last_row + 1
        };
        if !adjacent {
            self.flush();
            self.trailing = self.last_code_row == Some(row);
        }
        self.pending.push(node);
    }

    /// Marks a declaration; returns its doc comment, if any.
    fn code(&mut self, node: &Node<'t>, src: &[u8]) -> Option<CommentGroup> {
        let documents = !self.trailing
            && self
                .pending
                .last()
                .is_some_and(|last| last.end_position().row + 1 == node.start_position().row);
        let doc = if documents {
            Some(group(&self.pending, src))
        } else {
            None
        };
        self.flush();
        self.trailing = false;
        self.last_code_row = Some(node.end_position().row);
        doc
    }

    /// Marks a punctuation token (`(`, `)`, terminators).
    fn token(&mut self, node: &Node<'t>) {
        self.flush();
        self.trailing = false;
        self.last_code_row = Some(node.start_position().row);
    }

    fn flush(&mut self) {
        if !self.pending.is_empty() {
            self.done.push(std::mem::take(&mut self.pending));
        }
    }

    /// Every comment group seen so far, including the pending one.
    fn groups(&mut self, src: &[u8]) -> Vec<CommentGroup> {
        let mut groups: Vec<CommentGroup> = self.done.iter().map(|g| group(g, src)).collect();
        if !self.pending.is_empty() {
            groups.push(group(&self.pending, src));
        }
        groups
    }
}

fn group(nodes: &[Node<'_>], src: &[u8]) -> CommentGroup {
    let start = nodes.first().map_or(Pos::default(), |n| pos(n));
    let mut group = CommentGroup::from_raw(start, nodes.iter().map(|n| text(n, src)));
    if let Some(last) = nodes.last() {
        group.end_line = last.end_position().row + 1;
    }
    group
}

fn extract_func(node: &Node<'_>, src: &[u8], doc: Option<CommentGroup>) -> Option<FuncDecl> {
    let name = node.child_by_field_name("name").map(|n| ident(&n, src))?;
    let receiver = node
        .child_by_field_name("receiver")
        .map(|list| extract_receiver(&list, src));

    Some(FuncDecl {
        pos: pos(node),
        name,
        receiver,
        doc,
    })
}

fn extract_receiver(list: &Node<'_>, src: &[u8]) -> Receiver {
    let param = named_children(list).into_iter().find(|c| {
        matches!(
            c.kind(),
            "parameter_declaration" | "variadic_parameter_declaration"
        )
    });

    let Some(param) = param else {
        return Receiver {
            name: None,
            type_name: None,
        };
    };

    Receiver {
        name: param.child_by_field_name("name").map(|n| ident(&n, src)),
        type_name: param
            .child_by_field_name("type")
            .and_then(|t| receiver_type_name(&t, src)),
    }
}

/// Base type name of a receiver: `T`, `*T`, `T[K]`, `*T[K]`, `(T)`.
fn receiver_type_name(node: &Node<'_>, src: &[u8]) -> Option<String> {
    match node.kind() {
        "type_identifier" => Some(text(node, src).to_owned()),
        "pointer_type" | "parenthesized_type" => node
            .named_child(0)
            .and_then(|inner| receiver_type_name(&inner, src)),
        "generic_type" => node
            .child_by_field_name("type")
            .and_then(|inner| receiver_type_name(&inner, src)),
        _ => None,
    }
}

fn extract_type_decl(node: &Node<'_>, src: &[u8], doc: Option<CommentGroup>) -> TypeDecl {
    let children = all_children(node);
    let grouped = children.iter().any(|c| c.kind() == "(");
    let mut docs = DocTracker::default();
    let mut specs = Vec::new();

    for child in children {
        match child.kind() {
            "comment" => docs.comment(child),
            "type_spec" | "type_alias" => {
                let spec_doc = docs.code(&child, src);
                if let Some(name) = child.child_by_field_name("name") {
                    specs.push(TypeSpec {
                        name: ident(&name, src),
                        doc: if grouped { spec_doc } else { None },
                    });
                }
            }
            _ if child.is_named() => {
                docs.code(&child, src);
            }
            _ => docs.token(&child),
        }
    }

    TypeDecl {
        pos: pos(node),
        grouped,
        doc,
        specs,
    }
}

fn extract_value_decl(
    node: &Node<'_>,
    src: &[u8],
    doc: Option<CommentGroup>,
    kind: ValueKind,
) -> ValueDecl {
    // `var ( ... )` may wrap its specs in a `var_spec_list` node.
    let container = named_children(node)
        .into_iter()
        .find(|c| c.kind() == "var_spec_list")
        .unwrap_or(*node);

    let children = all_children(&container);
    let grouped = children.iter().any(|c| c.kind() == "(");
    let mut docs = DocTracker::default();
    let mut specs = Vec::new();

    for child in children {
        match child.kind() {
            "comment" => docs.comment(child),
            "const_spec" | "var_spec" => {
                let spec_doc = docs.code(&child, src);
                let names: Vec<Ident> = named_children(&child)
                    .into_iter()
                    .filter(|c| c.kind() == "identifier")
                    .map(|c| ident(&c, src))
                    .collect();
                if let Some(first) = names.first() {
                    specs.push(ValueSpec {
                        pos: first.pos,
                        names,
                        doc: if grouped { spec_doc } else { None },
                    });
                }
            }
            _ if child.is_named() => {
                docs.code(&child, src);
            }
            _ => docs.token(&child),
        }
    }

    ValueDecl {
        kind,
        pos: pos(node),
        grouped,
        doc,
        specs,
    }
}
