//! Default values for gapscan configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// Catalogue Defaults
// ============================================================================

/// Default catalogue file, relative to the working directory.
pub const DEFAULT_CATALOG_FILE: &str = "catalog.json";

/// Project-local configuration file name.
pub const PROJECT_CONFIG_FILE: &str = "gapscan.toml";

// ============================================================================
// Discovery Defaults
// ============================================================================

/// File extensions treated as templates during discovery.
pub const DEFAULT_TEMPLATE_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// Directories never descended into during discovery.
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &[
    // Version control
    ".git",
    ".svn",
    ".hg",
    // Dependencies
    "node_modules",
    "vendor",
    // Build outputs
    "target",
    "build",
    "dist",
    "cdk.out",
    ".aws-sam",
    ".serverless",
    // IDE/Editor
    ".idea",
    ".vscode",
];
