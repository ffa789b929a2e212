//! wfcatalog - example workflow catalog tooling
//!
//! Scaffolds new workflows, generates the index README and releases starter
//! workflows. Exits 0 on success, 1 on error and 130 when interrupted.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use wfcatalog::cli::{cli_to_config, Cli, Commands, GenerateTarget};
use wfcatalog::constants::EXIT_INTERRUPTED;
use wfcatalog::interrupt::CancellationFlag;
use wfcatalog::workflow::cli::{
    handle_generate_readme, handle_generate_workflow, handle_init_templates, handle_list,
    handle_release,
};
use wfcatalog::workflow::CatalogError;

fn main() {
    // Load environment variables from .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cancel = CancellationFlag::new();
    if let Err(e) = cancel.install_handler() {
        tracing::warn!("failed to install interrupt handler: {}", e);
    }

    if let Err(err) = run(&cli, cancel) {
        eprintln!("{:#}", err);
        let interrupted = err
            .chain()
            .any(|cause| matches!(cause.downcast_ref::<CatalogError>(), Some(CatalogError::Interrupted)));
        std::process::exit(if interrupted { EXIT_INTERRUPTED } else { 1 });
    }
}

/// Dispatch the parsed command
fn run(cli: &Cli, cancel: CancellationFlag) -> anyhow::Result<()> {
    let config = cli_to_config(cli);
    tracing::debug!(?config, "resolved configuration");

    match &cli.command {
        Commands::Generate { target } => match target {
            GenerateTarget::Workflow {
                id,
                starter,
                category,
            } => handle_generate_workflow(&config, id, *starter, *category, cancel),
            GenerateTarget::Readme { .. } => handle_generate_readme(&config, cancel),
        },
        Commands::Release { dry_run, .. } => handle_release(&config, *dry_run, cancel),
        Commands::InitTemplates { force } => handle_init_templates(&config, *force, cancel),
        Commands::List { starter } => handle_list(&config, *starter),
    }
}

/// Log to stderr, filtered by RUST_LOG (default: info, or debug with --verbose)
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "wfcatalog=debug" } else { "wfcatalog=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
