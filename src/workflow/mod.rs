//! Workflow catalog
//!
//! The catalog is a manifest (`workflow.config.json`) mapping workflow IDs
//! to their YAML and properties files. This module loads and validates it,
//! renders the index README, scaffolds new workflows and releases starter
//! workflows.

pub mod cli;
pub mod error;
pub mod group;
pub mod manifest;
pub mod promote;
pub mod readme;
pub mod scaffold;
pub mod types;
pub mod validate;

pub use error::CatalogError;
pub use manifest::Manifest;
pub use types::{Category, PropertiesRecord, WorkflowRecord};
