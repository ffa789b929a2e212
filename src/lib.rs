//! wfcatalog: tooling for an example workflow catalog
//!
//! This library backs the `wfcatalog` CLI: loading and validating the
//! workflow manifest, rendering the index README, scaffolding new example
//! workflows and releasing starter workflows.

pub mod cli;
pub mod config;
pub mod constants;
pub mod interrupt;
pub mod templates;
pub mod workflow;

pub use config::CatalogConfig;
pub use interrupt::CancellationFlag;
pub use templates::{TemplateError, TemplateRenderer};
pub use workflow::{CatalogError, Category, Manifest, PropertiesRecord, WorkflowRecord};
