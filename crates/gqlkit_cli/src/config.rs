//! `gqlkit.json` loading and validation.

use crate::error::CliError;
use gqlkit_ir::PrintOptions;
use gqlkit_semantic::{is_builtin_scalar, ScalarCandidate, ScalarMapping};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "gqlkit.json";

/// Project configuration. Every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GqlkitConfig {
    /// Root that diagnostic locations are printed relative to.
    pub source_root: PathBuf,
    /// Custom scalar mappings declared in config.
    pub scalars: Vec<ScalarMapping>,
    pub output: OutputConfig,
}

impl Default for GqlkitConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("."),
            scalars: Vec::new(),
            output: OutputConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutputConfig {
    /// Drop type definitions unreachable from `Query`/`Mutation`.
    pub prune_unused: bool,
    /// Indentation width of the printed SDL.
    pub indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prune_unused: true,
            indent: 2,
        }
    }
}

impl GqlkitConfig {
    /// Loads the config at `path`, or the default config file if present.
    ///
    /// An explicit path must exist. A missing default file yields the
    /// default config.
    pub fn resolve(path: Option<&Path>) -> Result<Self, CliError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(CONFIG_FILE_NAME);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    tracing::debug!("no {CONFIG_FILE_NAME} found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Reads, decodes and validates a config file.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let source = std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&source).map_err(|source| CliError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        tracing::debug!(
            path = %path.display(),
            scalars = config.scalars.len(),
            "loaded config"
        );
        Ok(config)
    }

    /// Decodes a config from JSON without validating it.
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    /// Rejects scalar mappings that shadow a built-in scalar.
    pub fn validate(&self) -> Result<(), CliError> {
        for mapping in &self.scalars {
            if is_builtin_scalar(&mapping.graphql_name) {
                return Err(CliError::config(
                    format!(
                        "scalar mapping \"{}\" redefines a built-in scalar",
                        mapping.graphql_name
                    ),
                    "built-in scalars (ID, Int, Float, String, Boolean) cannot be remapped; choose another graphqlName",
                ));
            }
            if mapping.graphql_name.is_empty() || mapping.type_name.is_empty() {
                return Err(CliError::config(
                    "scalar mapping with an empty name",
                    "every scalars[] entry needs a graphqlName and a typeName",
                ));
            }
        }
        Ok(())
    }

    /// Scalar candidates contributed by config mappings.
    pub fn scalar_candidates(&self) -> impl Iterator<Item = ScalarCandidate> + '_ {
        self.scalars.iter().map(ScalarMapping::to_candidate)
    }

    /// Printer options derived from the output section.
    #[must_use]
    pub fn print_options(&self) -> PrintOptions {
        PrintOptions {
            indent_size: self.output.indent,
            ..PrintOptions::default()
        }
    }
}
