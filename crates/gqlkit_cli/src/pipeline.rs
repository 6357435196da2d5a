//! Pipeline orchestration: scalars, integration, IR, pruning, diagnostics.

use crate::config::GqlkitConfig;
use crate::error::CliError;
use gqlkit_core::{collect, CollectedDiagnostics, Diagnostic};
use gqlkit_ir::{build_document, prune_document, Document};
use gqlkit_semantic::{
    collect_scalars, integrate, IntegrationResult, ResolverBuckets, ScalarCandidate,
    TypeDescriptor,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Extractor output, as handed to the CLI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractionBundle {
    pub types: Vec<TypeDescriptor>,
    pub resolvers: ResolverBuckets,
    /// Scalar candidates found in source metadata.
    pub scalar_candidates: Vec<ScalarCandidate>,
    /// Diagnostics reported by the extractor itself.
    pub diagnostics: Vec<Diagnostic>,
}

impl ExtractionBundle {
    /// Reads and decodes a bundle file.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let source = std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&source).map_err(|source| CliError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Everything a `build` run produced.
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    pub integration: IntegrationResult,
    /// The (possibly pruned) document; `None` when errors were found.
    pub document: Option<Document>,
    /// Sorted names removed by pruning.
    pub removed_types: Vec<String>,
    pub diagnostics: CollectedDiagnostics,
}

impl GenerateOutcome {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

/// Collects scalars and integrates the bundle.
pub fn analyze(bundle: &ExtractionBundle, config: &GqlkitConfig) -> IntegrationResult {
    let candidates = bundle
        .scalar_candidates
        .iter()
        .cloned()
        .chain(config.scalar_candidates());
    let scalars = collect_scalars(candidates);

    let upstream: Vec<Diagnostic> = bundle
        .diagnostics
        .iter()
        .chain(&scalars.diagnostics)
        .cloned()
        .collect();

    integrate(
        &bundle.types,
        &bundle.resolvers,
        &scalars.scalars,
        &upstream,
    )
}

/// Runs analysis and reports the collected diagnostics without building.
pub fn check(bundle: &ExtractionBundle, config: &GqlkitConfig) -> CollectedDiagnostics {
    collect(analyze(bundle, config).diagnostics)
}

/// Runs the full pipeline.
pub fn generate(bundle: &ExtractionBundle, config: &GqlkitConfig) -> GenerateOutcome {
    let integration = analyze(bundle, config);
    let diagnostics = collect(integration.diagnostics.iter().cloned());

    let mut removed_types = Vec::new();
    let document = if integration.has_errors {
        tracing::info!(
            errors = diagnostics.errors.len(),
            "skipping document build due to errors"
        );
        None
    } else {
        let document = build_document(&integration);
        if config.output.prune_unused {
            let pruned = prune_document(&document);
            removed_types = pruned.removed_types;
            Some(pruned.document)
        } else {
            Some(document)
        }
    };

    GenerateOutcome {
        integration,
        document,
        removed_types,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gqlkit_core::codes;

    const BUNDLE: &str = r#"{
        "types": [
            {
                "name": "User",
                "kind": "Object",
                "fields": [
                    { "name": "id", "type": { "typeName": "ID", "nullable": false } },
                    { "name": "joinedAt", "type": { "typeName": "DateTime", "nullable": false } }
                ],
                "sourceFile": "src/gql/types/user.ts"
            },
            {
                "name": "Legacy",
                "kind": "Object",
                "fields": [],
                "sourceFile": "src/gql/types/legacy.ts"
            },
            {
                "name": "Order",
                "kind": "Enum",
                "enumValues": [
                    { "name": "ASC", "originalValue": "asc" },
                    { "name": "DESC", "originalValue": "desc" }
                ],
                "sourceFile": "src/gql/types/order.ts"
            }
        ],
        "resolvers": {
            "queryFields": [
                {
                    "name": "users",
                    "type": { "typeName": "User", "nullable": false, "list": true, "listItemNullable": false },
                    "args": [
                        {
                            "name": "order",
                            "type": { "typeName": "Order", "nullable": true },
                            "defaultValue": { "kind": "enum", "value": "ASC" }
                        }
                    ],
                    "sourceFile": "src/gql/resolvers/query.ts"
                }
            ]
        },
        "scalarCandidates": [
            { "scalarName": "DateTime", "typeName": "Date", "sourceFile": "src/gql/scalars.ts", "line": 4 }
        ]
    }"#;

    fn bundle() -> ExtractionBundle {
        serde_json::from_str(BUNDLE).unwrap()
    }

    #[test]
    fn test_generate_prunes_by_default() {
        let outcome = generate(&bundle(), &GqlkitConfig::default());

        assert!(!outcome.has_errors());
        assert_eq!(outcome.removed_types, vec!["Legacy"]);
        let document = outcome.document.unwrap();
        let names: Vec<_> = document.type_names().collect();
        assert_eq!(names, vec!["DateTime", "Order", "Query", "User"]);
    }

    #[test]
    fn test_generate_without_pruning() {
        let mut config = GqlkitConfig::default();
        config.output.prune_unused = false;

        let outcome = generate(&bundle(), &config);
        assert!(outcome.removed_types.is_empty());
        assert!(outcome
            .document
            .unwrap()
            .type_definition("Legacy")
            .is_some());
    }

    #[test]
    fn test_errors_block_document() {
        let mut bundle = bundle();
        bundle.resolvers.query_fields[0].args.as_mut().unwrap()[0].default_value =
            Some(gqlkit_semantic::LiteralValue::Enum("SIDEWAYS".into()));

        let outcome = generate(&bundle, &GqlkitConfig::default());
        assert!(outcome.has_errors());
        assert!(outcome.document.is_none());
        assert_eq!(outcome.diagnostics.errors[0].code, codes::UNKNOWN_ENUM_VALUE);
    }

    #[test]
    fn test_config_scalars_join_candidates() {
        let mut bundle = bundle();
        bundle.scalar_candidates.clear();

        let missing = check(&bundle, &GqlkitConfig::default());
        assert!(!missing.has_errors());

        let config = GqlkitConfig::from_json(
            r#"{ "scalars": [{ "graphqlName": "DateTime", "typeName": "Date" }] }"#,
        )
        .unwrap();
        let outcome = generate(&bundle, &config);
        let scalar = &outcome.integration.scalars[0];
        assert!(scalar.input_type.from_config);
        assert!(outcome.document.unwrap().type_definition("DateTime").is_some());
    }

    #[test]
    fn test_upstream_diagnostics_deduplicated() {
        let mut bundle = bundle();
        let warning = Diagnostic::warning("UNRESOLVED_IMPORT", "could not resolve ./gone");
        bundle.diagnostics = vec![warning.clone(), warning];

        let collected = check(&bundle, &GqlkitConfig::default());
        assert_eq!(collected.warnings.len(), 1);
        assert!(collected.errors.is_empty());
    }

    #[test]
    fn test_scalar_errors_reach_the_report() {
        let mut bundle = bundle();
        bundle.scalar_candidates.push(ScalarCandidate::from_source(
            "DateTime",
            "string",
            "src/gql/scalars.ts",
            9,
        ));

        let outcome = generate(&bundle, &GqlkitConfig::default());
        assert!(outcome.has_errors());
        assert_eq!(
            outcome.diagnostics.errors[0].code,
            codes::MULTIPLE_INPUT_TYPES
        );
    }
}
