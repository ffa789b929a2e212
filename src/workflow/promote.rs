//! Release of starter workflows
//!
//! Copies every starter workflow and its properties file into a
//! starter-workflows checkout:
//!
//! ```text
//! <dest>/<type>/google-<workflow file>
//! <dest>/<type>/properties/google-<properties file>
//! ```
//!
//! Nothing is copied unless every starter entry validates and every
//! destination is distinct.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::CatalogConfig;
use crate::constants::{RELEASE_FILE_PREFIX, RELEASE_PROPERTIES_DIR};
use crate::interrupt::CancellationFlag;
use crate::workflow::error::{CatalogError, Result};
use crate::workflow::manifest::Manifest;
use crate::workflow::validate::{validate_records, ValidationContext, ValidationIssue, ValidationReport};

/// One file to copy into the release tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCopy {
    pub workflow_id: String,
    pub source: PathBuf,
    pub dest: PathBuf,
}

/// Copies starter workflows into the release tree
pub struct Promoter<'a> {
    config: &'a CatalogConfig,
    dest_root: PathBuf,
    cancel: CancellationFlag,
}

impl<'a> Promoter<'a> {
    pub fn new(config: &'a CatalogConfig, cancel: CancellationFlag) -> Self {
        Self {
            dest_root: config.release_output.clone(),
            config,
            cancel,
        }
    }

    /// Release into a different destination than the configured one
    pub fn with_dest_root<P: AsRef<Path>>(mut self, dest_root: P) -> Self {
        self.dest_root = dest_root.as_ref().to_path_buf();
        self
    }

    pub fn dest_root(&self) -> &Path {
        &self.dest_root
    }

    /// Validate the starter entries and compute every copy, in workflow ID order
    pub fn plan(&self, manifest: &Manifest) -> Result<Vec<FileCopy>> {
        let report = validate_records(&self.config.root, manifest.starters(), ValidationContext::Release);
        if !report.is_valid() {
            return Err(CatalogError::Invalid(report));
        }

        let mut copies = Vec::new();
        for (id, record) in manifest.starters() {
            let category_dir = self.dest_root.join(record.category.as_str());

            copies.push(FileCopy {
                workflow_id: id.to_string(),
                source: self.config.resolve(&record.workflow_path),
                dest: category_dir.join(prefixed_name(&record.workflow_path)),
            });
            copies.push(FileCopy {
                workflow_id: id.to_string(),
                source: self.config.resolve(&record.properties_path),
                dest: category_dir
                    .join(RELEASE_PROPERTIES_DIR)
                    .join(prefixed_name(&record.properties_path)),
            });
        }

        let report = find_collisions(&copies);
        if !report.is_valid() {
            return Err(CatalogError::Invalid(report));
        }

        debug!(copies = copies.len(), dest = %self.dest_root.display(), "planned release");
        Ok(copies)
    }

    /// Validate, then copy every starter workflow into the release tree.
    ///
    /// Existing destination files are replaced. Returns the copies made.
    pub fn promote(&self, manifest: &Manifest) -> Result<Vec<FileCopy>> {
        let copies = self.plan(manifest)?;

        for copy in &copies {
            self.cancel.check()?;
            copy_file(copy)?;
            info!(workflow = %copy.workflow_id, "copied {} -> {}", copy.source.display(), copy.dest.display());
        }

        Ok(copies)
    }
}

/// Report every copy whose destination an earlier copy already claimed
fn find_collisions(copies: &[FileCopy]) -> ValidationReport {
    let mut claimed: BTreeMap<&Path, &str> = BTreeMap::new();
    let mut report = ValidationReport::default();

    for copy in copies {
        match claimed.get(copy.dest.as_path()) {
            Some(other) => {
                let issue = ValidationIssue::DestinationCollision {
                    workflow_id: copy.workflow_id.clone(),
                    other_id: other.to_string(),
                    dest: copy.dest.clone(),
                };
                warn!(workflow = %copy.workflow_id, "{}", issue);
                report.issues.push(issue);
            }
            None => {
                claimed.insert(&copy.dest, &copy.workflow_id);
            }
        }
    }

    report
}

/// `google-<file name>` for a slash-separated manifest path
fn prefixed_name(path: &str) -> String {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    format!("{}-{}", RELEASE_FILE_PREFIX, file_name)
}

/// Replace `dest` with an independent copy of `source`
fn copy_file(copy: &FileCopy) -> Result<()> {
    let write_err = |source: std::io::Error| CatalogError::Write {
        path: copy.dest.clone(),
        source,
    };

    if let Some(parent) = copy.dest.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    match fs::remove_file(&copy.dest) {
        Ok(()) => debug!(dest = %copy.dest.display(), "removed existing release file"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(write_err(e)),
    }

    fs::copy(&copy.source, &copy.dest).map_err(write_err)?;
    Ok(())
}
