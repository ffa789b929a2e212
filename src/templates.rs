//! Handlebars template rendering
//!
//! Renders the catalog templates (the index README and the properties stub)
//! from a templates directory. The registry runs in strict mode, so a
//! template that references a field the data does not have fails instead
//! of rendering a blank.

use handlebars::Handlebars;
use serde::Serialize;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur with templates
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template '{}' not found", .0.display())]
    NotFound(PathBuf),

    #[error("IO error reading template '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid template '{name}': {source}")]
    Parse {
        name: String,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    #[error("Template rendering error in '{name}': {source}")]
    Render {
        name: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },

    #[error("Template '{name}' panicked while rendering: {message}")]
    Panicked { name: String, message: String },

    #[error("Failed to write rendered output to '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Renders templates loaded from a directory
pub struct TemplateRenderer {
    /// Handlebars registry
    handlebars: Handlebars<'static>,

    /// Templates directory
    templates_dir: PathBuf,
}

impl TemplateRenderer {
    /// Create a renderer for the given templates directory
    pub fn new<P: AsRef<Path>>(templates_dir: P) -> Self {
        Self {
            handlebars: Self::create_handlebars(),
            templates_dir: templates_dir.as_ref().to_path_buf(),
        }
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Path a template is loaded from
    pub fn template_path(&self, template_name: &str) -> PathBuf {
        self.templates_dir.join(template_name)
    }

    /// Check that a template exists without rendering it
    pub fn ensure_exists(&self, template_name: &str) -> Result<(), TemplateError> {
        let path = self.template_path(template_name);
        if !path.is_file() {
            return Err(TemplateError::NotFound(path));
        }
        Ok(())
    }

    /// Load a template from the templates directory.
    ///
    /// Templates are re-read on every call; a run renders each at most once.
    pub fn load_template(&mut self, template_name: &str) -> Result<(), TemplateError> {
        self.ensure_exists(template_name)?;
        let path = self.template_path(template_name);

        let source = fs::read_to_string(&path).map_err(|source| TemplateError::Read {
            path: path.clone(),
            source,
        })?;

        self.register_source(template_name, &source)?;
        debug!(template = template_name, path = %path.display(), "loaded template");
        Ok(())
    }

    /// Register a template from an in-memory source
    pub fn register_source(&mut self, template_name: &str, source: &str) -> Result<(), TemplateError> {
        self.handlebars
            .register_template_string(template_name, source)
            .map_err(|e| TemplateError::Parse {
                name: template_name.to_string(),
                source: Box::new(e),
            })
    }

    /// Render a template to a string
    pub fn render_to_string<T: Serialize>(
        &mut self,
        template_name: &str,
        data: &T,
    ) -> Result<String, TemplateError> {
        if !self.handlebars.has_template(template_name) {
            self.load_template(template_name)?;
        }

        let handlebars = &self.handlebars;
        let result = panic::catch_unwind(AssertUnwindSafe(|| handlebars.render(template_name, data)));

        match result {
            Ok(rendered) => rendered.map_err(|e| TemplateError::Render {
                name: template_name.to_string(),
                source: Box::new(e),
            }),
            Err(payload) => Err(TemplateError::Panicked {
                name: template_name.to_string(),
                message: panic_message(payload.as_ref()),
            }),
        }
    }

    /// Render a template and write the result to `dest`.
    ///
    /// Rendering completes before the destination is opened, so a failed
    /// render leaves any existing file untouched.
    pub fn render_to_file<T: Serialize>(
        &mut self,
        template_name: &str,
        data: &T,
        dest: &Path,
    ) -> Result<(), TemplateError> {
        let rendered = self.render_to_string(template_name, data)?;

        fs::write(dest, rendered).map_err(|source| TemplateError::Write {
            path: dest.to_path_buf(),
            source,
        })?;

        info!(template = template_name, dest = %dest.display(), "rendered template");
        Ok(())
    }

    /// Create a Handlebars instance for Markdown and JSON output
    fn create_handlebars() -> Handlebars<'static> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(|s| s.to_string());
        handlebars
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
