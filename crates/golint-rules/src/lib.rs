//! # golint-rules
//!
//! Built-in Go style rules for golint.
//!
//! ## Available Rules
//!
//! | Name | Category | Description |
//! |------|----------|-------------|
//! | `package-comment` | comments | Package comment exists, is attached and reads `Package foo ...` |
//! | `exported-type-doc` | comments | Exported types carry a doc comment starting with their name |
//! | `exported-func-doc` | comments | Exported functions and methods carry a doc comment starting with their name |
//! | `exported-value-doc` | comments | Exported constants and variables are documented, one exported name per spec |
//! | `name-stutter` | naming | Exported names do not repeat the package name |
//! | `names` | naming | MixedCaps names with consistent initialisms |
//! | `receiver-names` | naming | Receiver names are consistent and not `_`, `this` or `self` |
//!
//! ## Usage
//!
//! ```ignore
//! use golint_core::Linter;
//! use golint_rules::{default_rules, ExportedTypeDoc};
//!
//! let linter = Linter::builder()
//!     .rules(default_rules())
//!     .build()?;
//!
//! let docs_only = Linter::builder()
//!     .rule(ExportedTypeDoc::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod exported_func_doc;
mod exported_type_doc;
mod exported_value_doc;
mod name_stutter;
mod names;
mod package_comment;
mod presets;
mod receiver_names;

pub use exported_func_doc::ExportedFuncDoc;
pub use exported_type_doc::ExportedTypeDoc;
pub use exported_value_doc::ExportedValueDoc;
pub use name_stutter::NameStutter;
pub use names::Names;
pub use package_comment::PackageComment;
pub use presets::default_rules;
pub use receiver_names::ReceiverNames;

/// Re-export core types for convenience.
pub use golint_core::{Problem, Rule};
