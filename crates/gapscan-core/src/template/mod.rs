//! CloudFormation-style template model.
//!
//! Templates arrive as parsed documents in either JSON or YAML. Only the
//! `Resources` section participates in analysis; the remaining standard
//! sections are carried for round-trip fidelity and otherwise ignored.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

mod builder;

/// Errors raised while loading a template or walking a resource's
/// configuration.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("No resource named {0} in template")]
    UnknownResource(String),

    #[error("Property {property} references undeclared resource {target}")]
    DanglingReference { property: String, target: String },

    #[error("Unsupported value type {found} for property {property}")]
    UnsupportedPropertyType {
        property: String,
        found: &'static str,
    },

    #[error("Reference cycle through resource {0}")]
    CircularReference(String),

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl TemplateError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TemplateError::Io {
            path: path.into(),
            source,
        }
    }
}

/// A template document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CfnTemplate {
    #[serde(
        rename = "AWSTemplateFormatVersion",
        skip_serializing_if = "Option::is_none"
    )]
    pub format_version: Option<String>,

    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Template parameters. Not analyzed; a `Ref` can only point at a
    /// declared resource.
    #[serde(rename = "Parameters", skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,

    /// Declared resources by logical name.
    #[serde(rename = "Resources")]
    pub resources: BTreeMap<String, ResourceEntry>,

    #[serde(rename = "Outputs", skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Value>,
}

/// A single resource declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceEntry {
    /// Resource type, e.g. `AWS::S3::Bucket`.
    #[serde(rename = "Type")]
    pub resource_type: String,

    /// Declared configuration. Values are scalars, mappings, or sequences.
    #[serde(
        rename = "Properties",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub properties: BTreeMap<String, Value>,
}

impl CfnTemplate {
    /// Parses a template from a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self, TemplateError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parses a template from a YAML document.
    pub fn from_yaml_str(content: &str) -> Result<Self, TemplateError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Loads a template file, picking the parser by extension
    /// (`.json` parses as JSON, anything else as YAML).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| TemplateError::io(path, e))?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    /// Logical names of the declared resources, sorted.
    pub fn resource_names(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    /// Looks up a resource declaration by logical name.
    pub fn resource(&self, logical_name: &str) -> Option<&ResourceEntry> {
        self.resources.get(logical_name)
    }
}
