//! Error types for catalog operations

use std::path::PathBuf;

use crate::templates::TemplateError;
use crate::workflow::validate::ValidationReport;

/// Errors that can occur while reading, validating or writing the catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize manifest: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to process invalid configs: {0}")]
    Invalid(ValidationReport),

    #[error("invalid workflow path {path}: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("workflow {0} exists in the manifest, please use the existing workflow or a different name")]
    DuplicateId(String),

    #[error("workflow file {} already exists", .0.display())]
    PathCollision(PathBuf),

    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    #[error("operation interrupted")]
    Interrupted,
}

impl CatalogError {
    pub(crate) fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = CatalogError> = std::result::Result<T, E>;
