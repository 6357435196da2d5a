//! Custom scalar collection.
//!
//! Scalar candidates come from two places: branded scalar types found in
//! source metadata, and `scalars` mappings in the config file. Candidates are
//! grouped by GraphQL name and each group must resolve to exactly one input
//! representation and at least one output representation.

use gqlkit_core::{codes, Diagnostic, SourceLocation};
use indexmap::IndexMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Built-in GraphQL scalars. These are never collected as custom scalars.
pub const BUILTIN_SCALARS: [&str; 5] = ["ID", "Int", "Float", "String", "Boolean"];

/// Returns true if `name` is a built-in scalar.
#[must_use]
pub fn is_builtin_scalar(name: &str) -> bool {
    BUILTIN_SCALARS.contains(&name)
}

/// Restricts a scalar source type to one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScalarUsage {
    Input,
    Output,
}

/// A source type proposed as the representation of a custom scalar.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ScalarCandidate {
    pub scalar_name: String,
    pub type_name: String,
    /// `None` means the type serves as both input and output.
    #[cfg_attr(feature = "serde", serde(default))]
    pub only: Option<ScalarUsage>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub source_file: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub line: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub import_path: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub from_config: bool,
}

impl ScalarCandidate {
    /// Creates a candidate found in source metadata.
    pub fn from_source(
        scalar_name: impl Into<String>,
        type_name: impl Into<String>,
        source_file: impl Into<String>,
        line: u32,
    ) -> Self {
        Self {
            scalar_name: scalar_name.into(),
            type_name: type_name.into(),
            only: None,
            source_file: Some(source_file.into()),
            line: Some(line),
            description: None,
            import_path: None,
            from_config: false,
        }
    }

    #[must_use]
    pub fn only(mut self, usage: ScalarUsage) -> Self {
        self.only = Some(usage);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn accepts_input(&self) -> bool {
        self.only != Some(ScalarUsage::Output)
    }

    fn location(&self) -> Option<SourceLocation> {
        self.source_file
            .as_ref()
            .map(|file| SourceLocation::new(file.clone(), self.line.unwrap_or(1), 1))
    }

    fn describe(&self) -> String {
        match (&self.source_file, self.line) {
            (Some(file), Some(line)) => format!("{} ({file}:{line})", self.type_name),
            (Some(file), None) => format!("{} ({file})", self.type_name),
            (None, _) => format!("{} (config)", self.type_name),
        }
    }

    fn type_ref(&self) -> ScalarTypeRef {
        ScalarTypeRef {
            type_name: self.type_name.clone(),
            import_path: self.import_path.clone(),
            source_file: self.source_file.clone(),
            line: self.line,
            from_config: self.from_config,
        }
    }
}

/// A custom scalar mapping declared in configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ScalarMapping {
    pub graphql_name: String,
    pub type_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub import_path: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub only: Option<ScalarUsage>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
}

impl ScalarMapping {
    /// Converts the mapping into a config-origin candidate.
    #[must_use]
    pub fn to_candidate(&self) -> ScalarCandidate {
        ScalarCandidate {
            scalar_name: self.graphql_name.clone(),
            type_name: self.type_name.clone(),
            only: self.only,
            source_file: None,
            line: None,
            description: self.description.clone(),
            import_path: self.import_path.clone(),
            from_config: true,
        }
    }
}

/// The source type backing one direction of a custom scalar.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ScalarTypeRef {
    pub type_name: String,
    pub import_path: Option<String>,
    pub source_file: Option<String>,
    pub line: Option<u32>,
    pub from_config: bool,
}

/// A description contributed by one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DescriptionSource {
    pub text: String,
    pub source_file: Option<String>,
    pub line: Option<u32>,
    pub from_config: bool,
}

/// A validated custom scalar.
///
/// Holding `input_type` by value and rejecting groups without outputs keeps
/// the one-input / at-least-one-output invariant in the type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ScalarDescriptor {
    pub scalar_name: String,
    pub input_type: ScalarTypeRef,
    pub output_types: Vec<ScalarTypeRef>,
    /// Sorted by source file then line; config entries first.
    pub descriptions: Vec<DescriptionSource>,
    pub is_custom: bool,
}

impl ScalarDescriptor {
    /// All descriptions joined by a blank line.
    #[must_use]
    pub fn description(&self) -> Option<String> {
        if self.descriptions.is_empty() {
            return None;
        }
        Some(
            self.descriptions
                .iter()
                .map(|d| d.text.as_str())
                .collect::<Vec<_>>()
                .join("\n\n"),
        )
    }
}

/// Result of scalar collection.
#[derive(Debug, Clone, Default)]
pub struct ScalarCollection {
    /// Sorted by scalar name.
    pub scalars: Vec<ScalarDescriptor>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ScalarCollection {
    /// Returns true if any group was rejected.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Groups candidates by scalar name and validates every group.
///
/// Built-in scalar names are skipped. Groups are handled in name order so the
/// diagnostic order does not depend on input order.
pub fn collect_scalars<I>(candidates: I) -> ScalarCollection
where
    I: IntoIterator<Item = ScalarCandidate>,
{
    let mut groups: IndexMap<String, Vec<ScalarCandidate>> = IndexMap::new();
    for candidate in candidates {
        if is_builtin_scalar(&candidate.scalar_name) {
            continue;
        }
        groups
            .entry(candidate.scalar_name.clone())
            .or_default()
            .push(candidate);
    }
    groups.sort_keys();

    let mut collection = ScalarCollection::default();
    for (name, entries) in &groups {
        if let Some(scalar) = collect_group(name, entries, &mut collection.diagnostics) {
            collection.scalars.push(scalar);
        }
    }

    tracing::debug!(
        groups = groups.len(),
        collected = collection.scalars.len(),
        "collected custom scalars"
    );

    collection
}

fn collect_group(
    name: &str,
    entries: &[ScalarCandidate],
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<ScalarDescriptor> {
    let inputs: Vec<&ScalarCandidate> = entries.iter().filter(|c| c.accepts_input()).collect();
    let mut rejected = false;

    let input_type = match inputs.as_slice() {
        [] => {
            rejected = true;
            diagnostics.push(
                Diagnostic::error(
                    codes::MISSING_INPUT_TYPE,
                    format!(
                        "Custom scalar \"{name}\" has no input type; declare one type without `only` or with `only: \"input\"`"
                    ),
                )
                .with_location_opt(first_location(entries)),
            );
            None
        }
        [input] => Some(input.type_ref()),
        [first, ..] => {
            rejected = true;
            let listed = inputs
                .iter()
                .map(|c| c.describe())
                .collect::<Vec<_>>()
                .join(", ");
            diagnostics.push(
                Diagnostic::error(
                    codes::MULTIPLE_INPUT_TYPES,
                    format!(
                        "Custom scalar \"{name}\" has multiple input types: {listed}; mark all but one with `only: \"output\"`"
                    ),
                )
                .with_location_opt(first.location().or_else(|| first_location(entries))),
            );
            None
        }
    };

    // Both-direction entries come first, each bucket keeps source order.
    let output_types: Vec<ScalarTypeRef> = entries
        .iter()
        .filter(|c| c.only.is_none())
        .chain(
            entries
                .iter()
                .filter(|c| c.only == Some(ScalarUsage::Output)),
        )
        .map(ScalarCandidate::type_ref)
        .collect();

    if output_types.is_empty() {
        rejected = true;
        diagnostics.push(
            Diagnostic::error(
                codes::MISSING_OUTPUT_TYPE,
                format!(
                    "Custom scalar \"{name}\" has no output type; declare one type without `only` or with `only: \"output\"`"
                ),
            )
            .with_location_opt(first_location(entries)),
        );
    }

    let input_type = input_type.filter(|_| !rejected)?;

    Some(ScalarDescriptor {
        scalar_name: name.to_string(),
        input_type,
        output_types,
        descriptions: merge_descriptions(entries),
        is_custom: true,
    })
}

fn first_location(entries: &[ScalarCandidate]) -> Option<SourceLocation> {
    entries.iter().find_map(ScalarCandidate::location)
}

/// Orders descriptions by `(source file, line, text)`.
///
/// Config entries have no source file and sort as the empty string, so they
/// always come first, ordered among themselves by text.
fn merge_descriptions(entries: &[ScalarCandidate]) -> Vec<DescriptionSource> {
    let mut sources: Vec<DescriptionSource> = entries
        .iter()
        .filter_map(|c| {
            c.description.as_ref().map(|text| DescriptionSource {
                text: text.clone(),
                source_file: c.source_file.clone(),
                line: c.line,
                from_config: c.from_config,
            })
        })
        .collect();

    sources.sort_by(|a, b| {
        let a_key = (a.source_file.as_deref().unwrap_or(""), a.line.unwrap_or(0));
        let b_key = (b.source_file.as_deref().unwrap_or(""), b.line.unwrap_or(0));
        a_key.cmp(&b_key).then_with(|| a.text.cmp(&b.text))
    });
    sources
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, type_name: &str, file: &str, line: u32) -> ScalarCandidate {
        ScalarCandidate::from_source(name, type_name, file, line)
    }

    #[test]
    fn test_both_and_output_entries() {
        let collection = collect_scalars(vec![
            candidate("DateTime", "DateTimeOutput", "scalars.ts", 10).only(ScalarUsage::Output),
            candidate("DateTime", "DateTime", "scalars.ts", 3),
        ]);

        assert!(collection.diagnostics.is_empty());
        let scalar = &collection.scalars[0];
        assert_eq!(scalar.input_type.type_name, "DateTime");
        let outputs: Vec<_> = scalar
            .output_types
            .iter()
            .map(|t| t.type_name.as_str())
            .collect();
        assert_eq!(outputs, vec!["DateTime", "DateTimeOutput"]);
        assert!(scalar.is_custom);
    }

    #[test]
    fn test_multiple_input_types_rejects_group() {
        let collection = collect_scalars(vec![
            candidate("Money", "MoneyA", "a.ts", 1).only(ScalarUsage::Input),
            candidate("Money", "MoneyB", "b.ts", 1).only(ScalarUsage::Input),
        ]);

        assert!(collection.scalars.is_empty());
        assert!(collection
            .diagnostics
            .iter()
            .any(|d| d.code == codes::MULTIPLE_INPUT_TYPES));
        assert!(collection.has_errors());
    }

    #[test]
    fn test_missing_input_type() {
        let collection = collect_scalars(vec![
            candidate("Url", "UrlOut", "url.ts", 4).only(ScalarUsage::Output)
        ]);

        assert!(collection.scalars.is_empty());
        assert_eq!(collection.diagnostics.len(), 1);
        assert_eq!(collection.diagnostics[0].code, codes::MISSING_INPUT_TYPE);
        assert_eq!(
            collection.diagnostics[0].location,
            Some(SourceLocation::new("url.ts", 4, 1))
        );
    }

    #[test]
    fn test_missing_output_type() {
        let collection = collect_scalars(vec![
            candidate("Url", "UrlIn", "url.ts", 4).only(ScalarUsage::Input)
        ]);

        assert!(collection.scalars.is_empty());
        assert_eq!(collection.diagnostics[0].code, codes::MISSING_OUTPUT_TYPE);
    }

    #[test]
    fn test_builtins_are_skipped() {
        let collection = collect_scalars(vec![
            candidate("ID", "UserId", "ids.ts", 1),
            candidate("Int", "Count", "ids.ts", 2).only(ScalarUsage::Input),
        ]);

        assert!(collection.scalars.is_empty());
        assert!(collection.diagnostics.is_empty());
    }

    #[test]
    fn test_groups_sorted_by_name() {
        let collection = collect_scalars(vec![
            candidate("Url", "Url", "b.ts", 1),
            candidate("BigInt", "BigInt", "a.ts", 1),
            candidate("Json", "Json", "c.ts", 1),
        ]);

        let names: Vec<_> = collection
            .scalars
            .iter()
            .map(|s| s.scalar_name.as_str())
            .collect();
        assert_eq!(names, vec!["BigInt", "Json", "Url"]);
    }

    #[test]
    fn test_description_merge_order() {
        let config = ScalarMapping {
            graphql_name: "DateTime".to_string(),
            type_name: "Date".to_string(),
            import_path: None,
            only: Some(ScalarUsage::Output),
            description: Some("From config".to_string()),
        };
        let collection = collect_scalars(vec![
            candidate("DateTime", "DateTimeB", "b.ts", 1)
                .only(ScalarUsage::Output)
                .with_description("From b"),
            candidate("DateTime", "DateTime", "a.ts", 9).with_description("From a line 9"),
            config.to_candidate(),
        ]);

        let scalar = &collection.scalars[0];
        assert_eq!(
            scalar.description().as_deref(),
            Some("From config\n\nFrom a line 9\n\nFrom b")
        );
        assert!(scalar.descriptions[0].from_config);
    }

    #[test]
    fn test_config_descriptions_independent_of_order() {
        let mapping = |type_name: &str, only, description: &str| ScalarMapping {
            graphql_name: "Money".to_string(),
            type_name: type_name.to_string(),
            import_path: None,
            only,
            description: Some(description.to_string()),
        };
        let input = mapping("Cents", None, "Zebra notes");
        let output = mapping("Amount", Some(ScalarUsage::Output), "Amount in cents");
        let source = candidate("Money", "MoneyView", "money.ts", 2)
            .only(ScalarUsage::Output)
            .with_description("From source");

        let forward = collect_scalars(vec![
            input.to_candidate(),
            output.to_candidate(),
            source.clone(),
        ]);
        let backward = collect_scalars(vec![
            source,
            output.to_candidate(),
            input.to_candidate(),
        ]);

        assert!(forward.diagnostics.is_empty());
        assert_eq!(forward.scalars[0].descriptions, backward.scalars[0].descriptions);
        assert_eq!(
            forward.scalars[0].description().as_deref(),
            Some("Amount in cents\n\nZebra notes\n\nFrom source")
        );
    }

    #[test]
    fn test_no_description() {
        let collection = collect_scalars(vec![candidate("Url", "Url", "u.ts", 1)]);
        assert_eq!(collection.scalars[0].description(), None);
    }

    #[test]
    fn test_config_mapping_candidate() {
        let mapping = ScalarMapping {
            graphql_name: "Decimal".to_string(),
            type_name: "Decimal".to_string(),
            import_path: Some("decimal.js".to_string()),
            only: None,
            description: None,
        };
        let collection = collect_scalars(vec![mapping.to_candidate()]);

        let scalar = &collection.scalars[0];
        assert!(scalar.input_type.from_config);
        assert_eq!(scalar.input_type.import_path.as_deref(), Some("decimal.js"));
        assert_eq!(scalar.output_types.len(), 1);
    }

    #[test]
    fn test_collected_scalars_hold_invariant() {
        let collection = collect_scalars(vec![
            candidate("A", "A", "a.ts", 1),
            candidate("B", "B1", "b.ts", 1).only(ScalarUsage::Input),
            candidate("B", "B2", "b.ts", 2).only(ScalarUsage::Output),
            candidate("C", "C", "c.ts", 1).only(ScalarUsage::Input),
            candidate("C", "C2", "c.ts", 2),
        ]);

        for scalar in &collection.scalars {
            assert!(!scalar.output_types.is_empty());
        }
        assert_eq!(collection.scalars.len(), 2);
    }
}
