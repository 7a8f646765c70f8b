//! Capability pattern catalogue.
//!
//! The knowledge side of the system is an injected collaborator: anything
//! that can enumerate resource types and hand over raw pattern records
//! implements [`PatternSource`]. The catalogue canonicalizes every record
//! once, up front, and is read-only afterwards; building it is the single
//! write that happens before any scan runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::graph::PropertyGraph;

mod builder;
mod error;
mod file;
mod raw;

pub use builder::pattern_graph;
pub use error::CatalogError;
pub use file::{CatalogEntry, FilePatternSource};
pub use raw::{RawConfiguration, RawNode, RawRecord, RawRelationship};

/// A capability a resource type can provide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    /// Stable identifier, e.g. `encryption-at-rest`.
    pub id: String,

    /// Human-readable title.
    pub title: String,

    /// Parent capability id when part of a hierarchy. Carried through for
    /// catalogue fidelity; the engine never resolves it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl Capability {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            parent_id: None,
        }
    }
}

/// Supplier of raw capability patterns, typically a knowledge-graph
/// adapter or a catalogue file.
pub trait PatternSource {
    /// Resource types this source knows patterns for.
    fn resource_types(&self) -> Result<Vec<String>, CatalogError>;

    /// Raw pattern records for one resource type. Unknown types yield an
    /// empty list, not an error.
    fn patterns(&self, resource_type: &str)
        -> Result<Vec<(Capability, RawRecord)>, CatalogError>;
}

/// Canonicalized capability patterns, keyed by resource type.
#[derive(Debug, Clone, Default)]
pub struct PatternCatalog {
    patterns: BTreeMap<String, Vec<(Capability, PropertyGraph)>>,
}

impl PatternCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonicalizes every record a source offers.
    pub fn from_source(source: &impl PatternSource) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for resource_type in source.resource_types()? {
            for (capability, record) in source.patterns(&resource_type)? {
                let graph = pattern_graph(&record).map_err(|e| match e {
                    CatalogError::MalformedPattern(reason) => {
                        CatalogError::MalformedPattern(format!(
                            "{} (resource type {}, capability {})",
                            reason, resource_type, capability.id
                        ))
                    }
                    other => other,
                })?;
                catalog.insert(&resource_type, capability, graph);
            }
        }
        Ok(catalog)
    }

    /// Registers one canonical pattern.
    pub fn insert(
        &mut self,
        resource_type: impl Into<String>,
        capability: Capability,
        pattern: PropertyGraph,
    ) {
        self.patterns
            .entry(resource_type.into())
            .or_default()
            .push((capability, pattern));
    }

    /// Patterns registered for a resource type.
    pub fn patterns_for(&self, resource_type: &str) -> Option<&[(Capability, PropertyGraph)]> {
        self.patterns.get(resource_type).map(Vec::as_slice)
    }

    /// Resource types with at least one pattern, sorted.
    pub fn resource_types(&self) -> impl Iterator<Item = &str> {
        self.patterns.keys().map(String::as_str)
    }

    /// Total number of registered patterns.
    pub fn len(&self) -> usize {
        self.patterns.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
