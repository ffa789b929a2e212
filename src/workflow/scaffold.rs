//! Scaffolding of new example workflows
//!
//! `generate workflow deploy-cloudrun/cloudrun-docker` creates
//! `workflows/deploy-cloudrun/cloudrun-docker.yml`, a properties stub at
//! `properties/cloudrun-docker.properties.json`, the action README if the
//! action is new, and a manifest entry.
//!
//! All checks run before the first write. The writes themselves are not
//! transactional: if a later step fails, earlier files stay on disk and a
//! re-run stops at the collision checks until they are removed.

use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::config::CatalogConfig;
use crate::constants::{
    action_readme_heading, ACTION_README_FILE, PLACEHOLDER_WORKFLOW, PROPERTIES_SUFFIX,
    PROPERTIES_TEMPLATE, WORKFLOW_EXTENSION,
};
use crate::interrupt::CancellationFlag;
use crate::templates::TemplateRenderer;
use crate::workflow::error::{CatalogError, Result};
use crate::workflow::manifest::Manifest;
use crate::workflow::types::{Category, WorkflowRecord};

/// Paths derived from a `<action>/<workflow-id>` argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowLayout {
    /// Final segment of the argument
    pub workflow_id: String,
    /// First segment of the argument
    pub action_name: String,
    /// `<workflows>/<action>/README.md`
    pub action_readme_path: String,
    /// `<workflows>/<all but last segment>`
    pub workflow_dir: String,
    /// `<workflow_dir>/<workflow-id>.yml`
    pub workflow_path: String,
    /// `<properties>/<workflow-id>.properties.json`
    pub properties_path: String,
}

impl WorkflowLayout {
    /// Derive the layout for a new workflow.
    ///
    /// The argument needs at least an action segment and a workflow segment.
    /// Segments are limited to ASCII letters, digits, `.`, `_` and `-`, since
    /// they end up in file names and in the rendered properties JSON.
    pub fn from_arg(arg: &str, config: &CatalogConfig) -> Result<Self> {
        let parts: Vec<&str> = arg.split('/').collect();

        if parts.len() < 2 {
            return Err(CatalogError::invalid_path(
                arg,
                "path should have at least 2 folders, e.g. action-name/workflow-name",
            ));
        }
        if let Some(bad) = parts.iter().find(|p| p.is_empty() || **p == "." || **p == "..") {
            return Err(CatalogError::invalid_path(
                arg,
                format!("segment {:?} is not allowed", bad),
            ));
        }
        if let Some(bad) = parts.iter().find(|p| !p.chars().all(is_segment_char)) {
            return Err(CatalogError::invalid_path(
                arg,
                format!("segment {:?} may only contain letters, digits, '.', '_' and '-'", bad),
            ));
        }

        let workflow_id = parts[parts.len() - 1].to_string();
        let action_name = parts[0].to_string();
        let workflow_dir = config.workflow_dir(&parts[..parts.len() - 1].join("/"));
        let action_readme_path = format!("{}/{}", config.workflow_dir(&action_name), ACTION_README_FILE);

        Ok(Self {
            workflow_path: format!("{}/{}.{}", workflow_dir, workflow_id, WORKFLOW_EXTENSION),
            properties_path: format!("{}/{}{}", config.properties_dir, workflow_id, PROPERTIES_SUFFIX),
            workflow_id,
            action_name,
            action_readme_path,
            workflow_dir,
        })
    }
}

fn is_segment_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

/// Data passed to the properties stub template
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PropertiesTemplateData<'a> {
    workflow_id: &'a str,
}

/// What a successful scaffold created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldResult {
    pub layout: WorkflowLayout,
    pub record: WorkflowRecord,
    /// Whether the action README was written by this run
    pub created_action_readme: bool,
}

/// Creates new workflows and registers them in the manifest
pub struct Scaffolder<'a> {
    config: &'a CatalogConfig,
    renderer: TemplateRenderer,
    cancel: CancellationFlag,
}

impl<'a> Scaffolder<'a> {
    pub fn new(config: &'a CatalogConfig, cancel: CancellationFlag) -> Self {
        Self {
            renderer: TemplateRenderer::new(&config.templates_dir),
            config,
            cancel,
        }
    }

    /// Scaffold a new workflow from an `<action>/<workflow-id>` argument
    pub fn create_workflow(&mut self, arg: &str, starter: bool, category: Category) -> Result<ScaffoldResult> {
        let layout = WorkflowLayout::from_arg(arg, self.config)?;
        debug!(?layout, "derived workflow layout");

        let mut manifest = Manifest::load(&self.config.manifest_path)?;

        if manifest.contains(&layout.workflow_id) {
            return Err(CatalogError::DuplicateId(layout.workflow_id));
        }

        let workflow_file = self.config.resolve(&layout.workflow_path);
        if workflow_file.exists() {
            return Err(CatalogError::PathCollision(workflow_file));
        }

        let properties_file = self.config.resolve(&layout.properties_path);
        if properties_file.exists() {
            return Err(CatalogError::PathCollision(properties_file));
        }

        self.renderer.ensure_exists(PROPERTIES_TEMPLATE)?;

        // Checks passed; from here on every step writes
        self.cancel.check()?;
        let workflow_dir = self.config.resolve(&layout.workflow_dir);
        create_dir(&workflow_dir)?;

        let created_action_readme = self.write_action_readme(&layout)?;

        self.cancel.check()?;
        write_file(&workflow_file, PLACEHOLDER_WORKFLOW)?;
        info!(path = %workflow_file.display(), "created workflow file");

        self.cancel.check()?;
        if let Some(parent) = properties_file.parent() {
            create_dir(parent)?;
        }
        self.renderer.render_to_file(
            PROPERTIES_TEMPLATE,
            &PropertiesTemplateData {
                workflow_id: &layout.workflow_id,
            },
            &properties_file,
        )?;

        let record = WorkflowRecord {
            starter,
            category,
            workflow_path: layout.workflow_path.clone(),
            properties_path: layout.properties_path.clone(),
        };

        self.cancel.check()?;
        manifest.insert(layout.workflow_id.clone(), record.clone());
        manifest.save(&self.config.manifest_path)?;
        info!(workflow = %layout.workflow_id, "added workflow to manifest");

        Ok(ScaffoldResult {
            layout,
            record,
            created_action_readme,
        })
    }

    /// Write the placeholder action README if the action has none yet
    fn write_action_readme(&self, layout: &WorkflowLayout) -> Result<bool> {
        let readme = self.config.resolve(&layout.action_readme_path);
        if readme.exists() {
            return Ok(false);
        }

        self.cancel.check()?;
        write_file(&readme, &action_readme_heading(&layout.action_name))?;
        info!(path = %readme.display(), "created action README");
        Ok(true)
    }
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| CatalogError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| CatalogError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_from_arg() {
        let config = CatalogConfig::new(".");
        let layout = WorkflowLayout::from_arg("deploy-cloudrun/cloudrun-docker", &config).unwrap();
        assert_eq!(layout.workflow_id, "cloudrun-docker");
        assert_eq!(layout.action_name, "deploy-cloudrun");
        assert_eq!(layout.workflow_dir, "workflows/deploy-cloudrun");
        assert_eq!(layout.workflow_path, "workflows/deploy-cloudrun/cloudrun-docker.yml");
        assert_eq!(layout.action_readme_path, "workflows/deploy-cloudrun/README.md");
        assert_eq!(layout.properties_path, "properties/cloudrun-docker.properties.json");
    }

    #[test]
    fn test_layout_nested_directories() {
        let config = CatalogConfig::new(".");
        let layout = WorkflowLayout::from_arg("auth/gke/oidc", &config).unwrap();
        assert_eq!(layout.workflow_id, "oidc");
        assert_eq!(layout.action_name, "auth");
        assert_eq!(layout.workflow_dir, "workflows/auth/gke");
        assert_eq!(layout.workflow_path, "workflows/auth/gke/oidc.yml");
        assert_eq!(layout.action_readme_path, "workflows/auth/README.md");
    }

    #[test]
    fn test_layout_accepts_dotted_and_underscored_ids() {
        let config = CatalogConfig::new(".");
        let layout = WorkflowLayout::from_arg("setup_gcloud/v2.basic-run", &config).unwrap();
        assert_eq!(layout.workflow_id, "v2.basic-run");
    }

    #[test]
    fn test_layout_rejects_bad_arguments() {
        let config = CatalogConfig::new(".");
        for arg in [
            "lonely",
            "",
            "a//b",
            "../escape",
            "a/./b",
            "a/",
            "auth/say\"hi",
            "auth/back\\slash",
            "auth/with space",
            "auth/ünïcode",
        ] {
            assert!(
                matches!(WorkflowLayout::from_arg(arg, &config), Err(CatalogError::InvalidPath { .. })),
                "expected {:?} to be rejected",
                arg
            );
        }
    }
}
