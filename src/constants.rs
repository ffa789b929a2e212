// Fixed names and defaults for the catalog layout

// Catalog layout, relative to the catalog root
pub const MANIFEST_FILE: &str = "workflow.config.json";
pub const TEMPLATES_DIR: &str = "templates";
pub const WORKFLOWS_DIR: &str = "workflows";
pub const PROPERTIES_DIR: &str = "properties";
pub const README_OUTPUT: &str = "README.md";
pub const RELEASE_OUTPUT: &str = "../starter-workflows";

// Template file names inside the templates directory
pub const README_TEMPLATE: &str = "README.tmpl.md";
pub const PROPERTIES_TEMPLATE: &str = "workflow.properties.tmpl.json";

// Built-in template sources, written out by `init-templates`
pub const DEFAULT_README_TEMPLATE: &str = include_str!("../templates/README.tmpl.md");
pub const DEFAULT_PROPERTIES_TEMPLATE: &str =
    include_str!("../templates/workflow.properties.tmpl.json");

pub const README_TITLE: &str = "Google GitHub Actions - Example Workflows";

// Scaffolding placeholders
pub const WORKFLOW_EXTENSION: &str = "yml";
pub const PROPERTIES_SUFFIX: &str = ".properties.json";
pub const ACTION_README_FILE: &str = "README.md";
pub const PLACEHOLDER_WORKFLOW: &str = "# TODO: Add meaningful workflow content here.";

// Release naming
pub const RELEASE_FILE_PREFIX: &str = "google";
pub const RELEASE_PROPERTIES_DIR: &str = "properties";

// Environment overrides
pub const ENV_OUTPUT_PATH: &str = "OUTPUT_PATH";
pub const ENV_CATALOG_ROOT: &str = "WFCATALOG_ROOT";

/// Exit code used when the process is stopped by SIGINT/SIGTERM
pub const EXIT_INTERRUPTED: i32 = 130;

/// Format the heading written into a freshly scaffolded action README
pub fn action_readme_heading(action: &str) -> String {
    format!("# {} examples", action)
}
