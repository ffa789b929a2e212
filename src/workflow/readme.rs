//! Index README generation
//!
//! Validates the whole manifest, groups workflows by action and renders
//! `README.tmpl.md` into the configured output path. Nothing is written if
//! any entry fails validation.

use serde::Serialize;
use tracing::info;

use crate::config::CatalogConfig;
use crate::constants::{README_TEMPLATE, README_TITLE};
use crate::interrupt::CancellationFlag;
use crate::templates::TemplateRenderer;
use crate::workflow::error::{CatalogError, Result};
use crate::workflow::group::{group, ActionGroup};
use crate::workflow::manifest::Manifest;
use crate::workflow::types::PropertiesRecord;
use crate::workflow::validate::{validate_manifest, ValidationContext};

/// Data passed to the README template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadmeData {
    pub title: String,
    pub actions: Vec<ActionGroup>,
}

/// Validate the manifest and build the README template data
pub fn build_readme_data(config: &CatalogConfig, manifest: &Manifest) -> Result<ReadmeData> {
    let report = validate_manifest(&config.root, manifest, ValidationContext::Readme);
    if !report.is_valid() {
        return Err(CatalogError::Invalid(report));
    }

    let actions = group(manifest, |_, record| {
        PropertiesRecord::load(&config.resolve(&record.properties_path))
    })?;

    Ok(ReadmeData {
        title: README_TITLE.to_string(),
        actions,
    })
}

/// Generate the index README from the manifest on disk
pub fn generate_readme(config: &CatalogConfig, cancel: &CancellationFlag) -> Result<ReadmeData> {
    let manifest = Manifest::load(&config.manifest_path)?;
    let data = build_readme_data(config, &manifest)?;

    cancel.check()?;
    let mut renderer = TemplateRenderer::new(&config.templates_dir);
    renderer.render_to_file(README_TEMPLATE, &data, &config.readme_output)?;

    info!(
        actions = data.actions.len(),
        workflows = manifest.len(),
        output = %config.readme_output.display(),
        "generated README"
    );
    Ok(data)
}
