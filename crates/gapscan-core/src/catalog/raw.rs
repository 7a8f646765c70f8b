//! Wire model for raw capability pattern records.
//!
//! A record is the shape a pattern source hands over: the node and
//! relationship sets of two knowledge-graph traversals, one over the
//! analyzed resource's own configuration and one over auxiliary resources
//! that grant it capabilities from outside.

use serde::{Deserialize, Serialize};

use crate::graph::{EdgeKind, NodeKind};

/// One raw capability implementation pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    /// Traversal over the analyzed resource's own configuration.
    pub own_configuration: RawConfiguration,

    /// Traversal over auxiliary resources, when the capability needs any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auxiliary_configuration: Option<RawConfiguration>,
}

/// Node and relationship sets of one traversal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawConfiguration {
    #[serde(default)]
    pub nodes: Vec<RawNode>,

    #[serde(default)]
    pub relationships: Vec<RawRelationship>,
}

/// A node as reported by the knowledge side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNode {
    pub label: String,
    pub kind: NodeKind,
}

impl RawNode {
    pub fn resource(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: NodeKind::Resource,
        }
    }

    pub fn property(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: NodeKind::Property,
        }
    }

    pub fn use_case(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: NodeKind::UseCase,
        }
    }

    pub fn capability(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: NodeKind::Capability,
        }
    }
}

/// A directed relationship between two raw nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRelationship {
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    pub from: RawNode,
    pub to: RawNode,
}

impl RawRelationship {
    pub fn new(kind: EdgeKind, from: RawNode, to: RawNode) -> Self {
        Self { kind, from, to }
    }
}
