//! CLI integration for the workflow catalog
//!
//! Each handler runs one command against a [`CatalogConfig`] and prints the
//! user-facing diagnostics. Logging goes through `tracing`; the lines printed
//! here are the command's output.

use anyhow::Context;
use std::fs;

use crate::config::CatalogConfig;
use crate::constants::{
    DEFAULT_PROPERTIES_TEMPLATE, DEFAULT_README_TEMPLATE, PROPERTIES_TEMPLATE, README_TEMPLATE,
};
use crate::interrupt::CancellationFlag;
use crate::workflow::error::CatalogError;
use crate::workflow::group::derive_action_name;
use crate::workflow::manifest::Manifest;
use crate::workflow::promote::Promoter;
use crate::workflow::readme::generate_readme;
use crate::workflow::scaffold::Scaffolder;
use crate::workflow::types::Category;

/// Handle `generate workflow`
pub fn handle_generate_workflow(
    config: &CatalogConfig,
    id: &str,
    starter: bool,
    category: Category,
    cancel: CancellationFlag,
) -> anyhow::Result<()> {
    let mut scaffolder = Scaffolder::new(config, cancel);
    let result = scaffolder
        .create_workflow(id, starter, category)
        .with_context(|| format!("failed to generate workflow {}", id))?;

    if result.created_action_readme {
        println!("Created {}", result.layout.action_readme_path);
    }
    println!("Created {}", result.layout.workflow_path);
    println!("Created {}", result.layout.properties_path);
    println!(
        "Added {} to {}",
        result.layout.workflow_id,
        config.manifest_path.display()
    );
    Ok(())
}

/// Handle `generate readme`
pub fn handle_generate_readme(config: &CatalogConfig, cancel: CancellationFlag) -> anyhow::Result<()> {
    match generate_readme(config, &cancel) {
        Ok(data) => {
            println!(
                "Generated {} ({} actions)",
                config.readme_output.display(),
                data.actions.len()
            );
            Ok(())
        }
        Err(err) => {
            print_validation_issues(&err);
            Err(err).context("failed to generate readme")
        }
    }
}

/// Handle `release`
pub fn handle_release(
    config: &CatalogConfig,
    dry_run: bool,
    cancel: CancellationFlag,
) -> anyhow::Result<()> {
    let manifest = Manifest::load(&config.manifest_path).context("failed to load workflow config")?;
    let promoter = Promoter::new(config, cancel);

    let result = if dry_run {
        promoter.plan(&manifest)
    } else {
        promoter.promote(&manifest)
    };

    let copies = match result {
        Ok(copies) => copies,
        Err(err) => {
            print_validation_issues(&err);
            return Err(err).context("failed to release starter workflows");
        }
    };

    for copy in &copies {
        if dry_run {
            println!("would copy {} -> {}", copy.source.display(), copy.dest.display());
        } else {
            println!("successfully copied {} -> {}", copy.source.display(), copy.dest.display());
        }
    }

    if copies.is_empty() {
        println!("No starter workflows found in {}", config.manifest_path.display());
    }
    Ok(())
}

/// Handle `init-templates`
pub fn handle_init_templates(
    config: &CatalogConfig,
    force: bool,
    cancel: CancellationFlag,
) -> anyhow::Result<()> {
    fs::create_dir_all(&config.templates_dir).with_context(|| {
        format!("failed to create {}", config.templates_dir.display())
    })?;

    for (name, source) in [
        (README_TEMPLATE, DEFAULT_README_TEMPLATE),
        (PROPERTIES_TEMPLATE, DEFAULT_PROPERTIES_TEMPLATE),
    ] {
        let path = config.templates_dir.join(name);
        if path.exists() && !force {
            println!("Skipping {} (already exists, use --force to overwrite)", path.display());
            continue;
        }

        cancel.check()?;
        fs::write(&path, source).with_context(|| format!("failed to write {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

/// Handle `list`
pub fn handle_list(config: &CatalogConfig, starter_only: bool) -> anyhow::Result<()> {
    let manifest = Manifest::load(&config.manifest_path).context("failed to load workflow config")?;

    let entries: Vec<_> = if starter_only {
        manifest.starters().collect()
    } else {
        manifest.iter().collect()
    };

    if entries.is_empty() {
        println!("No workflows found in {}", config.manifest_path.display());
        return Ok(());
    }

    for (id, record) in entries {
        let action = derive_action_name(&record.workflow_path)
            .map(|a| a.name)
            .unwrap_or_else(|_| "?".to_string());
        let marker = if record.starter { " (starter)" } else { "" };
        println!("  - {} [{}] {}{}", id, action, record.category, marker);
    }

    Ok(())
}

/// Print each validation issue on its own line
fn print_validation_issues(err: &CatalogError) {
    if let CatalogError::Invalid(report) = err {
        for issue in &report.issues {
            println!("validation failed: {}", issue);
        }
    }
}
