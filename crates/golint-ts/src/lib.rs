//! # golint-ts
//!
//! Tree-sitter front end for the golint engine.
//!
//! This crate turns Go source text into the `golint-core` facts the rules
//! consume. It provides:
//!
//! - [`LanguageExtractor`] trait for pluggable front ends
//! - [`GoExtractor`] for package clauses, declarations and doc comments
//! - [`ExtractError`] for grammar, parse and syntax failures

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod extractor;
pub mod go;

pub use extractor::{ExtractError, LanguageExtractor};
pub use go::GoExtractor;
