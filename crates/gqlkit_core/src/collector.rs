//! Final-stage diagnostic deduplication.

use crate::diagnostics::{Diagnostic, DiagnosticSeverity};
use rustc_hash::FxHashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Deduplicated diagnostics, split by severity.
///
/// Both lists keep the order in which diagnostics were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CollectedDiagnostics {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl CollectedDiagnostics {
    /// Returns true if any error survived deduplication.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the total number of unique diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// Returns true if there are no diagnostics at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Deduplicates diagnostics by [`Diagnostic::dedup_key`] and partitions them.
///
/// The first occurrence of a key wins.
pub fn collect<I>(diagnostics: I) -> CollectedDiagnostics
where
    I: IntoIterator<Item = Diagnostic>,
{
    let mut seen = FxHashSet::default();
    let mut collected = CollectedDiagnostics::default();

    for diagnostic in diagnostics {
        if !seen.insert(diagnostic.dedup_key()) {
            continue;
        }
        match diagnostic.severity {
            DiagnosticSeverity::Error => collected.errors.push(diagnostic),
            DiagnosticSeverity::Warning => collected.warnings.push(diagnostic),
        }
    }

    collected
}
