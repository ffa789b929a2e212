//! Command-line interface definition and argument parsing
//!
//! This module uses clap to define and parse command-line arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::CatalogConfig;
use crate::constants::ENV_CATALOG_ROOT;
use crate::workflow::types::Category;

/// Command-line arguments for wfcatalog
#[derive(Parser, Debug)]
#[command(
    name = "wfcatalog",
    about = "Maintain an example workflow catalog",
    version,
    long_about = "Scaffolds new example workflows, validates the workflow manifest and renders the index README, and releases starter workflows into a starter-workflows checkout."
)]
pub struct Cli {
    /// Catalog root directory
    #[arg(long, global = true, env = ENV_CATALOG_ROOT)]
    pub root: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands for wfcatalog
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a new workflow or the index README
    Generate {
        #[command(subcommand)]
        target: GenerateTarget,
    },

    /// Copy starter workflows into a starter-workflows checkout
    Release {
        /// Destination root, relative to --root (default: OUTPUT_PATH or ../starter-workflows)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print the files that would be copied without copying them
        #[arg(long)]
        dry_run: bool,
    },

    /// Write the built-in templates into the templates directory
    InitTemplates {
        /// Overwrite templates that already exist
        #[arg(long)]
        force: bool,
    },

    /// List workflows in the manifest
    List {
        /// Only list starter workflows
        #[arg(long)]
        starter: bool,
    },
}

/// What `generate` creates
#[derive(Subcommand, Debug)]
pub enum GenerateTarget {
    /// Scaffold a new workflow, e.g. `deploy-cloudrun/cloudrun-docker`
    Workflow {
        /// Action directory and workflow ID, slash separated
        id: String,

        /// Mark the workflow as a starter workflow
        #[arg(long)]
        starter: bool,

        /// Starter workflow type (automation, ci, code-scanning, deployments)
        #[arg(long = "type", default_value = "deployments", value_parser = parse_category)]
        category: Category,
    },

    /// Render the index README from the manifest
    Readme {
        /// Output path, relative to --root (default: OUTPUT_PATH or README.md)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Parse workflow type from string
fn parse_category(arg: &str) -> Result<Category, String> {
    arg.to_lowercase().parse()
}

/// Build the catalog configuration for the parsed command line
pub fn cli_to_config(cli: &Cli) -> CatalogConfig {
    let config = match &cli.root {
        Some(root) => CatalogConfig::new(root),
        None => CatalogConfig::from_env(),
    };

    match &cli.command {
        Commands::Generate {
            target: GenerateTarget::Readme { output },
        } => {
            let mut config = config.with_readme_output_from_env();
            if let Some(output) = output {
                config.readme_output = config.resolve(output);
            }
            config
        }
        Commands::Release { output, .. } => {
            let mut config = config.with_release_output_from_env();
            if let Some(output) = output {
                config.release_output = config.resolve(output);
            }
            config
        }
        _ => config,
    }
}
