//! Diagnostic reporting for gqlkit.

use crate::location::SourceLocation;
use std::fmt;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DiagnosticSeverity {
    /// An error that prevents schema generation.
    Error,
    /// A warning that doesn't prevent schema generation.
    Warning,
}

impl DiagnosticSeverity {
    /// Returns the lowercase name used in dedup keys and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[error("{message}")]
pub struct Diagnostic {
    /// Stable diagnostic code, see [`codes`].
    pub code: String,
    /// Human readable message.
    pub message: String,
    /// Severity level.
    pub severity: DiagnosticSeverity,
    /// Where the problem was found, if known.
    pub location: Option<SourceLocation>,
}

impl Diagnostic {
    /// Creates a new error diagnostic.
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: DiagnosticSeverity::Error,
            location: None,
        }
    }

    /// Creates a new warning diagnostic.
    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: DiagnosticSeverity::Warning,
            location: None,
        }
    }

    /// Attaches a location to the diagnostic.
    #[must_use]
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Attaches an optional location to the diagnostic.
    #[must_use]
    pub fn with_location_opt(mut self, location: Option<SourceLocation>) -> Self {
        self.location = location;
        self
    }

    /// Returns true if this is an error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }

    /// Identity used for deduplication.
    ///
    /// `code::message::severity::file:line:col`, with an empty location part
    /// when the diagnostic has no location.
    #[must_use]
    pub fn dedup_key(&self) -> String {
        let location = self
            .location
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        format!(
            "{}::{}::{}::{}",
            self.code, self.message, self.severity, location
        )
    }
}

impl miette::Diagnostic for Diagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.code))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.severity {
            DiagnosticSeverity::Error => miette::Severity::Error,
            DiagnosticSeverity::Warning => miette::Severity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.location
            .as_ref()
            .map(|loc| Box::new(format!("at {loc}")) as Box<dyn fmt::Display + 'a>)
    }
}

/// A collection of diagnostics.
#[derive(Debug, Default, Clone)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBag {
    /// Adds a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Adds an error diagnostic.
    pub fn error(
        &mut self,
        code: impl Into<String>,
        message: impl Into<String>,
        location: Option<SourceLocation>,
    ) {
        self.add(Diagnostic::error(code, message).with_location_opt(location));
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Returns the number of errors.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// Returns true if there are no diagnostics.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Returns the number of diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Consumes the bag, returning diagnostics in insertion order.
    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl Extend<Diagnostic> for DiagnosticBag {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        self.diagnostics.extend(iter);
    }
}

impl From<Vec<Diagnostic>> for DiagnosticBag {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

/// Stable diagnostic codes.
pub mod codes {
    pub const MULTIPLE_INPUT_TYPES: &str = "MULTIPLE_INPUT_TYPES";
    pub const MISSING_INPUT_TYPE: &str = "MISSING_INPUT_TYPE";
    pub const MISSING_OUTPUT_TYPE: &str = "MISSING_OUTPUT_TYPE";
    pub const UNKNOWN_TARGET_TYPE: &str = "UNKNOWN_TARGET_TYPE";
    pub const DEFAULT_VALUE_TYPE_MISMATCH: &str = "DEFAULT_VALUE_TYPE_MISMATCH";
    pub const NULL_DEFAULT_FOR_NON_NULL: &str = "NULL_DEFAULT_FOR_NON_NULL";
    pub const UNKNOWN_ENUM_VALUE: &str = "UNKNOWN_ENUM_VALUE";
    pub const INVALID_INPUT_OBJECT_FIELD: &str = "INVALID_INPUT_OBJECT_FIELD";
}
