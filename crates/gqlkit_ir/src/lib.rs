//! Document IR for gqlkit.
//!
//! This crate provides:
//! - `ast`: Definition nodes of the schema document
//! - `builder`: Deterministic conversion from an integration result
//! - `prune`: Removal of types unreachable from the root operation types
//! - `printer`: SDL rendering

pub mod ast;
pub mod builder;
pub mod printer;
pub mod prune;

pub use ast::*;
pub use builder::build_document;
pub use printer::{print_document, print_document_with_options, PrintOptions, Printer};
pub use prune::{prune_document, PruneResult};
