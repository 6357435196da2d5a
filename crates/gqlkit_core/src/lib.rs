//! Core utilities for gqlkit.
//!
//! This crate provides foundational types used throughout gqlkit:
//! - `location`: Source location tracking
//! - `diagnostics`: Error reporting
//! - `collector`: Final-stage diagnostic deduplication

pub mod collector;
pub mod diagnostics;
pub mod location;

pub use collector::{collect, CollectedDiagnostics};
pub use diagnostics::{codes, Diagnostic, DiagnosticBag, DiagnosticSeverity};
pub use location::SourceLocation;
