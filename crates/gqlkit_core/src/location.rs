//! Source location representation.

use std::fmt;
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A position in a source file, 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SourceLocation {
    /// Path of the file, as reported by the extractor.
    pub file: String,
    /// Line number (1-based).
    pub line: u32,
    /// Column number (1-based).
    pub column: u32,
}

impl SourceLocation {
    /// Creates a new location.
    #[must_use]
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// Creates a location pointing at the start of a file.
    #[must_use]
    pub fn start_of(file: impl Into<String>) -> Self {
        Self::new(file, 1, 1)
    }

    /// Returns a copy of this location with `file` made relative to `source_root`.
    ///
    /// Files outside the root are left untouched.
    #[must_use]
    pub fn relative_to(&self, source_root: &Path) -> Self {
        let file = Path::new(&self.file)
            .strip_prefix(source_root)
            .map_or_else(|_| self.file.clone(), |p| p.display().to_string());
        Self {
            file,
            line: self.line,
            column: self.column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_display() {
        let loc = SourceLocation::new("src/gqlkit/schema/user.ts", 12, 3);
        assert_eq!(loc.to_string(), "src/gqlkit/schema/user.ts:12:3");
    }

    #[test]
    fn test_start_of() {
        let loc = SourceLocation::start_of("a.ts");
        assert_eq!((loc.line, loc.column), (1, 1));
    }

    #[test]
    fn test_relative_to() {
        let loc = SourceLocation::new("/repo/src/types/user.ts", 4, 1);
        let rel = loc.relative_to(Path::new("/repo/src"));
        assert_eq!(rel.file, "types/user.ts");
        assert_eq!(rel.line, 4);

        let outside = SourceLocation::new("/elsewhere/a.ts", 1, 1);
        assert_eq!(outside.relative_to(Path::new("/repo")).file, "/elsewhere/a.ts");
    }
}
