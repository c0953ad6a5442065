//! Context types for rule execution.
//!
//! [`PackageContext`] holds facts that depend on every file of a package and
//! is built before any rule runs. [`PassState`] is the mutable bookkeeping
//! owned by one evaluation pass. [`FileContext`] is what a rule sees.

use crate::config::Policy;
use crate::facts::{Decl, Pos, SourceFile};
use crate::types::{Position, Problem};

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Methods that together make a type sortable.
const SORT_METHODS: [(&str, u8); 3] = [("Len", 1), ("Less", 1 << 1), ("Swap", 1 << 2)];
const SORTABLE: u8 = 0b111;

/// Receiver names that never seed the consistency table.
const NON_RECEIVER_NAMES: [&str; 3] = ["_", "this", "self"];

/// Package-wide facts derived before rule evaluation.
#[derive(Debug, Clone, Default)]
pub struct PackageContext {
    name: String,
    sortable_types: HashSet<String>,
    generated_files: HashSet<PathBuf>,
    receiver_names: HashMap<String, String>,
    documented: bool,
}

impl PackageContext {
    /// Builds the context from every file of one package.
    ///
    /// Malformed facts (methods without a plain receiver type, unnamed
    /// receivers) are not counted.
    #[must_use]
    pub fn build(files: &[SourceFile], policy: &Policy) -> Self {
        let mut ctx = Self {
            name: files
                .first()
                .map(|f| f.package.name.clone())
                .unwrap_or_default(),
            ..Self::default()
        };

        let mut sort_methods: HashMap<&str, u8> = HashMap::new();

        for file in files {
            if is_generated(file, policy) {
                debug!("Generated file: {}", file.path.display());
                ctx.generated_files.insert(file.path.clone());
            }

            if file.package_doc.is_some() && !file.is_test() {
                ctx.documented = true;
            }

            for method in file.methods() {
                let Some(recv) = method.receiver_type() else {
                    continue;
                };

                if let Some((_, bit)) = SORT_METHODS
                    .iter()
                    .find(|(name, _)| *name == method.name.name)
                {
                    *sort_methods.entry(recv).or_insert(0) |= bit;
                }

                let receiver_name = method
                    .receiver
                    .as_ref()
                    .and_then(|r| r.name.as_ref())
                    .map(|ident| ident.name.as_str());
                if let Some(name) = receiver_name {
                    if !NON_RECEIVER_NAMES.contains(&name) {
                        ctx.receiver_names
                            .entry(recv.to_string())
                            .or_insert_with(|| name.to_string());
                    }
                }
            }
        }

        ctx.sortable_types = sort_methods
            .into_iter()
            .filter(|(_, bits)| *bits == SORTABLE)
            .map(|(recv, _)| recv.to_string())
            .collect();

        debug!(
            "Package {}: {} sortable type(s), {} generated file(s)",
            ctx.name,
            ctx.sortable_types.len(),
            ctx.generated_files.len()
        );

        ctx
    }

    /// Package name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the package is a command.
    #[must_use]
    pub fn is_main(&self) -> bool {
        self.name == "main"
    }

    /// Whether `type_name` declares `Len`, `Less` and `Swap`.
    #[must_use]
    pub fn is_sortable(&self, type_name: &str) -> bool {
        self.sortable_types.contains(type_name)
    }

    /// Whether the file at `path` is machine-generated.
    #[must_use]
    pub fn is_generated(&self, path: &Path) -> bool {
        self.generated_files.contains(path)
    }

    /// First receiver name used for `type_name` in the package.
    #[must_use]
    pub fn receiver_name(&self, type_name: &str) -> Option<&str> {
        self.receiver_names.get(type_name).map(String::as_str)
    }

    /// Whether any non-test file carries a package comment.
    #[must_use]
    pub fn is_documented(&self) -> bool {
        self.documented
    }
}

fn is_generated(file: &SourceFile, policy: &Policy) -> bool {
    file.leading_comments
        .iter()
        .flat_map(|group| group.lines.iter())
        .any(|line| policy.is_generated_marker(line))
}

/// Identifies one grouped declaration within a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId {
    /// Index of the file in the package.
    pub file: usize,
    /// Index of the declaration in the file.
    pub decl: usize,
}

/// Bookkeeping owned by one evaluation pass over a package.
#[derive(Debug, Default)]
pub struct PassState {
    missing_comment_groups: HashSet<GroupId>,
}

impl PassState {
    /// Creates empty pass state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a missing-comment report for `group`.
    ///
    /// Returns `false` if the group was already reported.
    pub fn mark_missing_comment(&mut self, group: GroupId) -> bool {
        self.missing_comment_groups.insert(group)
    }

    /// Whether a missing-comment report was already emitted for `group`.
    #[must_use]
    pub fn has_missing_comment(&self, group: GroupId) -> bool {
        self.missing_comment_groups.contains(&group)
    }
}

/// Context provided to rules for one file.
#[derive(Debug, Clone, Copy)]
pub struct FileContext<'a> {
    /// The file being checked.
    pub file: &'a SourceFile,
    /// Index of the file within the package.
    pub index: usize,
    /// Package-wide facts.
    pub package: &'a PackageContext,
    /// Policy tables.
    pub policy: &'a Policy,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(
        file: &'a SourceFile,
        index: usize,
        package: &'a PackageContext,
        policy: &'a Policy,
    ) -> Self {
        Self {
            file,
            index,
            package,
            policy,
        }
    }

    /// Path of the file.
    #[must_use]
    pub fn path(&self) -> &'a Path {
        &self.file.path
    }

    /// Package name as declared by this file.
    #[must_use]
    pub fn package_name(&self) -> &'a str {
        &self.file.package.name
    }

    /// Whether the file is generated.
    #[must_use]
    pub fn is_generated(&self) -> bool {
        self.package.is_generated(&self.file.path)
    }

    /// Iterates over declarations together with their group ids.
    pub fn decls(&self) -> impl Iterator<Item = (GroupId, &'a Decl)> + 'a {
        let file = self.index;
        self.file
            .decls
            .iter()
            .enumerate()
            .map(move |(decl, d)| (GroupId { file, decl }, d))
    }

    /// Converts a fact position into a report position for this file.
    #[must_use]
    pub fn position(&self, pos: Pos) -> Position {
        Position::new(self.file.path.clone(), pos.line, pos.column).with_offset(pos.offset)
    }

    /// Creates a problem at `pos`, filling in the source line.
    #[must_use]
    pub fn problem(
        &self,
        pos: Pos,
        confidence: f64,
        category: &str,
        text: impl Into<String>,
    ) -> Problem {
        Problem::new(self.position(pos), confidence, category, text)
            .with_line_text(self.file.line(pos.line))
    }
}
