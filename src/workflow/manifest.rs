//! Manifest store
//!
//! Loads and saves `workflow.config.json`, the mapping from workflow ID to
//! its [`WorkflowRecord`]. Entries are kept in a `BTreeMap`, so iteration
//! and serialization are always sorted by ID and the file diffs cleanly.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::workflow::error::{CatalogError, Result};
use crate::workflow::types::{read_json, WorkflowRecord};

/// All workflows in the catalog, keyed by workflow ID
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    workflows: BTreeMap<String, WorkflowRecord>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the manifest from disk
    pub fn load(path: &Path) -> Result<Self> {
        let manifest: Manifest = read_json(path)?;
        debug!(path = %path.display(), workflows = manifest.len(), "loaded manifest");
        Ok(manifest)
    }

    /// Write the whole manifest back to disk
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_json_pretty()?;
        fs::write(path, content).map_err(|source| CatalogError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), workflows = self.len(), "saved manifest");
        Ok(())
    }

    /// Serialize with sorted keys, two-space indentation and a trailing newline
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut content = serde_json::to_string_pretty(self).map_err(CatalogError::Serialize)?;
        content.push('\n');
        Ok(content)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.workflows.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&WorkflowRecord> {
        self.workflows.get(id)
    }

    /// Add or replace an entry
    pub fn insert(&mut self, id: impl Into<String>, record: WorkflowRecord) -> Option<WorkflowRecord> {
        self.workflows.insert(id.into(), record)
    }

    /// Iterate entries in ascending byte-wise ID order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &WorkflowRecord)> {
        self.workflows.iter().map(|(id, record)| (id.as_str(), record))
    }

    /// Workflow IDs, sorted
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.workflows.keys().map(String::as_str)
    }

    /// Starter workflows only, sorted by ID
    pub fn starters(&self) -> impl Iterator<Item = (&str, &WorkflowRecord)> {
        self.iter().filter(|(_, record)| record.starter)
    }

    pub fn len(&self) -> usize {
        self.workflows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workflows.is_empty()
    }
}

impl FromIterator<(String, WorkflowRecord)> for Manifest {
    fn from_iter<I: IntoIterator<Item = (String, WorkflowRecord)>>(iter: I) -> Self {
        Self {
            workflows: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::types::Category;

    fn record(action: &str, name: &str, starter: bool) -> WorkflowRecord {
        WorkflowRecord {
            starter,
            category: Category::Deployments,
            workflow_path: format!("workflows/{}/{}.yml", action, name),
            properties_path: format!("properties/{}.properties.json", name),
        }
    }

    #[test]
    fn test_iteration_is_sorted_by_id() {
        let mut manifest = Manifest::new();
        manifest.insert("zeta", record("a", "zeta", false));
        manifest.insert("Alpha", record("a", "Alpha", false));
        manifest.insert("alpha", record("a", "alpha", true));

        let ids: Vec<&str> = manifest.ids().collect();
        // byte-wise: uppercase sorts before lowercase
        assert_eq!(ids, vec!["Alpha", "alpha", "zeta"]);

        let starters: Vec<&str> = manifest.starters().map(|(id, _)| id).collect();
        assert_eq!(starters, vec!["alpha"]);
    }

    #[test]
    fn test_save_is_stable_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workflow.config.json");

        let mut manifest = Manifest::new();
        manifest.insert("b-flow", record("b", "b-flow", true));
        manifest.insert("a-flow", record("a", "a-flow", false));
        manifest.save(&path).unwrap();

        let first = fs::read_to_string(&path).unwrap();
        assert!(first.find("\"a-flow\"").unwrap() < first.find("\"b-flow\"").unwrap());
        assert!(first.contains("\n  \"a-flow\": {\n    \"starter\": false,"));
        assert!(first.ends_with("}\n"));

        let reloaded = Manifest::load(&path).unwrap();
        assert_eq!(reloaded, manifest);
        reloaded.save(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), first);
    }

    #[test]
    fn test_load_rejects_non_object_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workflow.config.json");

        fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(matches!(Manifest::load(&path), Err(CatalogError::Parse { .. })));

        fs::write(&path, r#"{"x": "not an object"}"#).unwrap();
        assert!(matches!(Manifest::load(&path), Err(CatalogError::Parse { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Manifest::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }
}
