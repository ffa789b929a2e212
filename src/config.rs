//! Configuration for the catalog tools
//!
//! Every path the commands touch comes from here. Defaults are the fixed
//! catalog layout relative to the catalog root; `OUTPUT_PATH` and
//! `WFCATALOG_ROOT` override them, and CLI flags override the environment.

use std::env;
use std::path::{Path, PathBuf};

use crate::constants::{
    ENV_CATALOG_ROOT, ENV_OUTPUT_PATH, MANIFEST_FILE, PROPERTIES_DIR, README_OUTPUT,
    RELEASE_OUTPUT, TEMPLATES_DIR, WORKFLOWS_DIR,
};

/// Paths used by the catalog commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Catalog root; manifest paths resolve against it
    pub root: PathBuf,

    /// Manifest file (`workflow.config.json`)
    pub manifest_path: PathBuf,

    /// Directory holding the README and properties templates
    pub templates_dir: PathBuf,

    /// Workflows root, relative to `root` as written into the manifest
    pub workflows_root: String,

    /// Properties directory, relative to `root` as written into the manifest
    pub properties_dir: String,

    /// Where `generate readme` writes the index
    pub readme_output: PathBuf,

    /// Where `release` copies starter workflows
    pub release_output: PathBuf,
}

impl CatalogConfig {
    /// Create a configuration with the default layout under `root`
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            manifest_path: root.join(MANIFEST_FILE),
            templates_dir: root.join(TEMPLATES_DIR),
            workflows_root: WORKFLOWS_DIR.to_string(),
            properties_dir: PROPERTIES_DIR.to_string(),
            readme_output: root.join(README_OUTPUT),
            release_output: root.join(RELEASE_OUTPUT),
            root,
        }
    }

    /// Build a configuration from the environment.
    ///
    /// `WFCATALOG_ROOT` selects the root (default: current directory).
    pub fn from_env() -> Self {
        let root = env::var_os(ENV_CATALOG_ROOT)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(root)
    }

    /// Output override for `generate readme`, from `OUTPUT_PATH`
    pub fn with_readme_output_from_env(mut self) -> Self {
        if let Some(path) = env::var_os(ENV_OUTPUT_PATH) {
            self.readme_output = self.resolve(path);
        }
        self
    }

    /// Output override for `release`, from `OUTPUT_PATH`
    pub fn with_release_output_from_env(mut self) -> Self {
        if let Some(path) = env::var_os(ENV_OUTPUT_PATH) {
            self.release_output = self.resolve(path);
        }
        self
    }

    /// Resolve a path relative to the catalog root; absolute paths pass through
    pub fn resolve<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.root.join(path)
    }

    /// Action directory for a slash-separated path below the workflows root
    pub fn workflow_dir(&self, relative: &str) -> String {
        format!("{}/{}", self.workflows_root, relative)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
