//! Validation of manifest entries against the filesystem
//!
//! Every record is checked and every problem is collected, so one run
//! reports all broken entries instead of stopping at the first.

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::workflow::group::derive_action_name;
use crate::workflow::manifest::Manifest;
use crate::workflow::types::WorkflowRecord;

/// Which files a record must resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationContext {
    /// README generation: workflow, properties and the action README
    Readme,
    /// Starter release: workflow and properties
    Release,
}

/// Kind of file a manifest entry references
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Workflow,
    Properties,
    ActionReadme,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FileKind::Workflow => write!(f, "workflow file"),
            FileKind::Properties => write!(f, "properties file"),
            FileKind::ActionReadme => write!(f, "action README"),
        }
    }
}

/// A single problem found in a manifest entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// A referenced file does not exist
    MissingFile {
        workflow_id: String,
        kind: FileKind,
        path: PathBuf,
    },
    /// The workflow path is too short to name an action
    InvalidPath {
        workflow_id: String,
        path: String,
        reason: String,
    },
    /// Two release copies would land on the same destination file
    DestinationCollision {
        workflow_id: String,
        other_id: String,
        dest: PathBuf,
    },
}

impl ValidationIssue {
    pub fn workflow_id(&self) -> &str {
        match self {
            ValidationIssue::MissingFile { workflow_id, .. } => workflow_id,
            ValidationIssue::InvalidPath { workflow_id, .. } => workflow_id,
            ValidationIssue::DestinationCollision { workflow_id, .. } => workflow_id,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ValidationIssue::MissingFile {
                workflow_id,
                kind,
                path,
            } => write!(
                f,
                "{} does not exist for workflow {}: path - {}",
                kind,
                workflow_id,
                path.display()
            ),
            ValidationIssue::InvalidPath {
                workflow_id,
                path,
                reason,
            } => write!(
                f,
                "invalid workflow path for workflow {}: {} ({})",
                workflow_id, path, reason
            ),
            ValidationIssue::DestinationCollision {
                workflow_id,
                other_id,
                dest,
            } => write!(
                f,
                "release destination for workflow {} is already used by workflow {}: path - {}",
                workflow_id,
                other_id,
                dest.display()
            ),
        }
    }
}

/// All problems found across a manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of distinct workflows with at least one issue
    pub fn invalid_workflows(&self) -> usize {
        let mut ids: Vec<&str> = self.issues.iter().map(|i| i.workflow_id()).collect();
        ids.dedup();
        ids.len()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} problem(s) in {} workflow(s)",
            self.issues.len(),
            self.invalid_workflows()
        )
    }
}

/// Check the files one record references. Paths resolve against `root`.
pub fn validate_record(
    root: &Path,
    id: &str,
    record: &WorkflowRecord,
    context: ValidationContext,
) -> Vec<ValidationIssue> {
    let missing = |kind: FileKind, relative: &str| {
        let path = root.join(relative);
        (!path.exists()).then(|| ValidationIssue::MissingFile {
            workflow_id: id.to_string(),
            kind,
            path,
        })
    };

    let mut issues: Vec<ValidationIssue> = [
        missing(FileKind::Workflow, &record.workflow_path),
        missing(FileKind::Properties, &record.properties_path),
    ]
    .into_iter()
    .flatten()
    .collect();

    if context == ValidationContext::Readme {
        match derive_action_name(&record.workflow_path) {
            Ok(action) => issues.extend(missing(FileKind::ActionReadme, &action.readme_path)),
            Err(_) => issues.push(ValidationIssue::InvalidPath {
                workflow_id: id.to_string(),
                path: record.workflow_path.clone(),
                reason: "should be at least workflows/action-name/workflow-name.yml".to_string(),
            }),
        }
    }

    issues
}

/// Validate a set of records, logging each issue as it is found
pub fn validate_records<'a, I>(root: &Path, records: I, context: ValidationContext) -> ValidationReport
where
    I: IntoIterator<Item = (&'a str, &'a WorkflowRecord)>,
{
    let mut report = ValidationReport::default();

    for (id, record) in records {
        for issue in validate_record(root, id, record, context) {
            warn!(workflow = id, "{}", issue);
            report.issues.push(issue);
        }
    }

    report
}

/// Validate every record in the manifest
pub fn validate_manifest(root: &Path, manifest: &Manifest, context: ValidationContext) -> ValidationReport {
    validate_records(root, manifest.iter(), context)
}
