use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical label of a property nested under a parent node.
///
/// The root of a resource's graph is labeled with the resource type
/// verbatim; every nested property appends `-{property}` to its parent's
/// label. Labels stay human-readable end to end and are never hashed.
pub fn child_label(parent: &str, property: &str) -> String {
    format!("{}-{}", parent, property)
}

/// Identity of a vertex in a configuration graph.
///
/// The `own` flag separates the resource under analysis (and its
/// properties) from auxiliary resources a capability pattern requires
/// alongside it. Two vertices with the same label but different ownership
/// are distinct, which is what keeps auxiliary requirements unmatchable by
/// the analyzed resource's own configuration.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    /// True when the vertex belongs to the resource under analysis.
    pub own: bool,
    /// Canonical label: a resource type, or a `{parent}-{property}` chain.
    pub label: String,
}

impl NodeId {
    /// Vertex belonging to the analyzed resource.
    pub fn own(label: impl Into<String>) -> Self {
        Self {
            own: true,
            label: label.into(),
        }
    }

    /// Vertex describing an auxiliary resource, property, or indirection.
    pub fn auxiliary(label: impl Into<String>) -> Self {
        Self {
            own: false,
            label: label.into(),
        }
    }

    /// Vertex for a property nested under this one, keeping ownership.
    pub fn child(&self, property: &str) -> Self {
        Self {
            own: self.own,
            label: child_label(&self.label, property),
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Role of a vertex within a configuration graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    /// A deployable resource, root of its own configuration subtree.
    Resource,
    /// A configuration property, possibly nested.
    Property,
    /// Pattern-side indirection ("can be used to ..."); removed when a
    /// pattern is canonicalized.
    UseCase,
    /// Terminal endpoint of a capability-granting edge inside auxiliary
    /// sub-patterns. Never matchable and never planned.
    Capability,
}

/// Relationship kinds carried by graph edges.
///
/// Matching is endpoint-based and ignores the kind; the kind still matters
/// for pattern canonicalization (which edges enter a graph at all) and for
/// plan rendering (`UsesOtherResourceTo` drives the value hint).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeKind {
    /// Structural nesting: a node directly contains a property.
    HasSubproperty,
    /// A property references another resource to fulfill a role.
    UsesOtherResourceTo,
    /// A resource or property can serve a use case.
    CanBeUsedTo,
    /// An auxiliary resource grants capabilities to the analyzed resource.
    AddsCapabilitiesToResource,
    /// A property enables a capability on its own resource. Excluded from
    /// own-configuration graphs.
    EnablesInternalCapability,
    /// A use case provides a capability. Excluded from
    /// auxiliary-configuration graphs.
    ProvidesCapability,
}
