//! Command-line interface for gqlkit.
//!
//! # Usage
//!
//! ```bash
//! # Report every diagnostic for an extraction bundle
//! gqlkit check bundle.json
//!
//! # Emit pruned SDL
//! gqlkit build bundle.json -o schema.graphql
//!
//! # Emit the unpruned IR as JSON
//! gqlkit build bundle.json --format json --no-prune
//! ```

pub mod config;
pub mod error;
pub mod pipeline;

pub use config::GqlkitConfig;
pub use error::CliError;
pub use pipeline::{ExtractionBundle, GenerateOutcome};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use gqlkit_core::{CollectedDiagnostics, Diagnostic, DiagnosticSeverity};
use gqlkit_ir::print_document_with_options;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "gqlkit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// GraphQL SDL
    #[default]
    Sdl,
    /// The document IR as JSON
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate an extraction bundle and print every diagnostic
    Check {
        /// Extraction bundle (JSON)
        bundle: PathBuf,

        /// Config file (defaults to ./gqlkit.json when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Build the schema document
    Build {
        /// Extraction bundle (JSON)
        bundle: PathBuf,

        /// Config file (defaults to ./gqlkit.json when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "sdl")]
        format: OutputFormat,

        /// Keep types unreachable from Query/Mutation
        #[arg(long)]
        no_prune: bool,
    },

    /// Print version information
    Version,
}

pub fn run(cli: Cli) -> Result<i32, CliError> {
    match cli.command {
        Commands::Check { bundle, config } => {
            check_bundle(&bundle, config.as_deref(), cli.verbose, cli.quiet)
        }
        Commands::Build {
            bundle,
            config,
            output,
            format,
            no_prune,
        } => build_bundle(
            &bundle,
            config.as_deref(),
            &BuildOptions {
                output,
                format,
                no_prune,
                verbose: cli.verbose,
                quiet: cli.quiet,
            },
        ),
        Commands::Version => {
            println!("gqlkit {}", env!("CARGO_PKG_VERSION"));
            Ok(0)
        }
    }
}

fn check_bundle(
    bundle_path: &Path,
    config_path: Option<&Path>,
    verbose: bool,
    quiet: bool,
) -> Result<i32, CliError> {
    let config = GqlkitConfig::resolve(config_path)?;
    let bundle = ExtractionBundle::load(bundle_path)?;
    let diagnostics = pipeline::check(&bundle, &config);

    report_diagnostics(&diagnostics, &config.source_root, quiet);

    if diagnostics.has_errors() {
        return Ok(1);
    }
    if !quiet {
        println!(
            "{} {} type(s) checked",
            "Success:".green().bold(),
            bundle.types.len()
        );
        if verbose {
            println!("  {} {}", "bundle".dimmed(), bundle_path.display());
        }
    }
    Ok(0)
}

struct BuildOptions {
    output: Option<PathBuf>,
    format: OutputFormat,
    no_prune: bool,
    verbose: bool,
    quiet: bool,
}

fn build_bundle(
    bundle_path: &Path,
    config_path: Option<&Path>,
    options: &BuildOptions,
) -> Result<i32, CliError> {
    let mut config = GqlkitConfig::resolve(config_path)?;
    if options.no_prune {
        config.output.prune_unused = false;
    }
    let bundle = ExtractionBundle::load(bundle_path)?;
    let outcome = pipeline::generate(&bundle, &config);

    report_diagnostics(&outcome.diagnostics, &config.source_root, options.quiet);

    let Some(document) = outcome.document.as_ref().filter(|_| !outcome.has_errors()) else {
        eprintln!(
            "{} {} error(s) found, no schema emitted",
            "Error:".red().bold(),
            outcome.diagnostics.errors.len()
        );
        return Ok(1);
    };

    if options.verbose {
        for name in &outcome.removed_types {
            eprintln!("  {} {}", "Removed".dimmed(), name);
        }
    }

    let rendered = match options.format {
        OutputFormat::Sdl => print_document_with_options(document, config.print_options()),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(document)?;
            json.push('\n');
            json
        }
    };

    match &options.output {
        Some(path) => {
            std::fs::write(path, &rendered).map_err(|source| CliError::Write {
                path: path.clone(),
                source,
            })?;
            if !options.quiet {
                println!(
                    "{} {} ({} definition(s))",
                    "Wrote".green(),
                    path.display(),
                    document.definitions.len()
                );
            }
        }
        None => print!("{rendered}"),
    }

    Ok(0)
}

/// Prints errors, then warnings. Warnings are suppressed by `quiet`.
fn report_diagnostics(diagnostics: &CollectedDiagnostics, source_root: &Path, quiet: bool) {
    for diagnostic in &diagnostics.errors {
        eprintln!("{}", render_diagnostic(diagnostic, source_root));
    }
    if !quiet {
        for diagnostic in &diagnostics.warnings {
            eprintln!("{}", render_diagnostic(diagnostic, source_root));
        }
    }
}

fn render_diagnostic(diagnostic: &Diagnostic, source_root: &Path) -> String {
    let label = match diagnostic.severity {
        DiagnosticSeverity::Error => "Error".red().bold(),
        DiagnosticSeverity::Warning => "Warning".yellow().bold(),
    };
    let mut rendered = format!("{label} [{}] {}", diagnostic.code, diagnostic.message);
    if let Some(location) = &diagnostic.location {
        rendered.push_str(&format!(
            "\n  {} {}",
            "-->".blue(),
            location.relative_to(source_root)
        ));
    }
    rendered
}
