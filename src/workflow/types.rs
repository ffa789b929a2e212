//! Type definitions for the workflow catalog
//!
//! Defines the manifest record for each workflow, the category a starter
//! workflow is published under, and the per-workflow properties file.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::workflow::error::{CatalogError, Result};

/// A single manifest entry describing one example workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRecord {
    /// Whether the workflow is promoted to the starter-workflows catalog
    #[serde(default)]
    pub starter: bool,

    /// Starter workflow category, also the release subdirectory
    #[serde(rename = "type", default)]
    pub category: Category,

    /// Workflow YAML path, relative to the catalog root
    pub workflow_path: String,

    /// Properties JSON path, relative to the catalog root
    pub properties_path: String,
}

/// Category a starter workflow is published under
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Automation,
    Ci,
    CodeScanning,
    #[default]
    Deployments,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Automation,
        Category::Ci,
        Category::CodeScanning,
        Category::Deployments,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Automation => "automation",
            Category::Ci => "ci",
            Category::CodeScanning => "code-scanning",
            Category::Deployments => "deployments",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
                format!("Unknown workflow type: {}. Valid options: {}", s, valid.join(", "))
            })
    }
}

/// Contents of a `*.properties.json` file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertiesRecord {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub creator: String,
    #[serde(default)]
    pub icon_name: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl PropertiesRecord {
    /// Load a properties file. Always read fresh from disk.
    pub fn load(path: &Path) -> Result<Self> {
        read_json(path)
    }
}

/// Read and deserialize a JSON file, keeping read and parse failures apart
pub(crate) fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_uses_manifest_field_names() {
        let json = r#"{
            "starter": true,
            "type": "code-scanning",
            "workflowPath": "workflows/scan/scan.yml",
            "propertiesPath": "properties/scan.properties.json"
        }"#;

        let record: WorkflowRecord = serde_json::from_str(json).unwrap();
        assert!(record.starter);
        assert_eq!(record.category, Category::CodeScanning);
        assert_eq!(record.workflow_path, "workflows/scan/scan.yml");

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], "code-scanning");
        assert_eq!(value["propertiesPath"], "properties/scan.properties.json");
    }

    #[test]
    fn test_category_defaults_to_deployments() {
        let json = r#"{"workflowPath": "workflows/a/b.yml", "propertiesPath": "p.json"}"#;
        let record: WorkflowRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.category, Category::Deployments);
        assert!(!record.starter);
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("ci".parse::<Category>(), Ok(Category::Ci));
        assert_eq!("automation".parse::<Category>(), Ok(Category::Automation));
        let err = "nightly".parse::<Category>().unwrap_err();
        assert!(err.contains("nightly"));
        assert!(err.contains("code-scanning"));
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let json = r#"{"type": "nightly", "workflowPath": "a", "propertiesPath": "b"}"#;
        assert!(serde_json::from_str::<WorkflowRecord>(json).is_err());
    }

    #[test]
    fn test_properties_ignore_extra_fields() {
        let json = r#"{
            "name": "Deploy",
            "description": "Deploys things",
            "creator": "Google",
            "iconName": "google",
            "categories": ["Deployment", "Docker"],
            "filePatterns": ["Dockerfile"]
        }"#;

        let props: PropertiesRecord = serde_json::from_str(json).unwrap();
        assert_eq!(props.icon_name, "google");
        assert_eq!(props.categories, vec!["Deployment", "Docker"]);
    }

    #[test]
    fn test_load_properties_reports_read_and_parse_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            PropertiesRecord::load(&missing),
            Err(CatalogError::Read { .. })
        ));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(
            PropertiesRecord::load(&broken),
            Err(CatalogError::Parse { .. })
        ));
    }
}
