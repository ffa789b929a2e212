//! Grouping of manifest entries by owning action
//!
//! A workflow at `workflows/deploy-cloudrun/cloudrun-docker.yml` belongs to
//! the `deploy-cloudrun` action. The README lists actions in name order and,
//! inside each action, workflows in workflow ID order. Both orders are fixed
//! so the generated README only changes when the manifest does.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::constants::ACTION_README_FILE;
use crate::workflow::error::{CatalogError, Result};
use crate::workflow::manifest::Manifest;
use crate::workflow::types::{PropertiesRecord, WorkflowRecord};

/// Location of a workflow file relative to its owning action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionPath {
    /// Action name, the second path segment
    pub name: String,
    /// `<root>/<action>`
    pub path: String,
    /// `<root>/<action>/README.md`
    pub readme_path: String,
    /// Path below the action directory without the file extension
    pub relative_name: String,
}

/// Derive the owning action from a workflow path.
///
/// The path must have at least two segments below the workflows root: the
/// action directory and the workflow file. Empty segments are rejected.
pub fn derive_action_name(workflow_path: &str) -> Result<ActionPath> {
    let parts: Vec<&str> = workflow_path.split('/').collect();

    if parts.len() < 3 {
        return Err(CatalogError::invalid_path(
            workflow_path,
            "should be at least workflows/action-name/workflow-name.yml",
        ));
    }
    if parts.iter().any(|p| p.is_empty()) {
        return Err(CatalogError::invalid_path(workflow_path, "path contains an empty segment"));
    }

    let name = parts[1].to_string();
    let path = parts[..2].join("/");
    let readme_path = format!("{}/{}", path, ACTION_README_FILE);

    let sub_path = parts[2..].join("/");
    let file_name = parts[parts.len() - 1];
    let relative_name = match file_name.rfind('.') {
        Some(dot) => sub_path[..sub_path.len() - (file_name.len() - dot)].to_string(),
        None => sub_path,
    };

    Ok(ActionPath {
        name,
        path,
        readme_path,
        relative_name,
    })
}

/// One workflow row in the README
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowEntry {
    pub id: String,
    pub name: String,
    pub relative_name: String,
    pub description: String,
    pub starter: bool,
    pub workflow_path: String,
    pub properties_path: String,
}

/// All workflows belonging to one action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionGroup {
    pub name: String,
    pub path: String,
    pub readme_path: String,
    pub workflows: Vec<WorkflowEntry>,
}

/// Group manifest entries by action.
///
/// `properties` is called once per workflow, in ID order, to supply the
/// display name and description.
pub fn group<F>(manifest: &Manifest, mut properties: F) -> Result<Vec<ActionGroup>>
where
    F: FnMut(&str, &WorkflowRecord) -> Result<PropertiesRecord>,
{
    let mut actions: BTreeMap<String, ActionGroup> = BTreeMap::new();

    // Manifest iteration is already sorted by workflow ID
    for (id, record) in manifest.iter() {
        let action = derive_action_name(&record.workflow_path)?;
        let props = properties(id, record)?;

        let action_group = actions.entry(action.name.clone()).or_insert_with(|| ActionGroup {
            name: action.name.clone(),
            path: action.path.clone(),
            readme_path: action.readme_path.clone(),
            workflows: Vec::new(),
        });

        action_group.workflows.push(WorkflowEntry {
            id: id.to_string(),
            name: props.name,
            relative_name: action.relative_name,
            description: props.description,
            starter: record.starter,
            workflow_path: record.workflow_path.clone(),
            properties_path: record.properties_path.clone(),
        });
    }

    let mut groups: Vec<ActionGroup> = actions.into_values().collect();
    groups.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(groups)
}
