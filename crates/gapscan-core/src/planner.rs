//! Delta computation and plan generation.
//!
//! The delta between a capability pattern and a resource's current
//! configuration is the part of the pattern the configuration does not
//! cover. A plan renders that delta as resource steps in reverse
//! topological order, so anything a step references already exists by the
//! time the step applies.

use std::collections::{BTreeMap, BTreeSet};

use crate::graph::{EdgeKind, NodeId, NodeKind, PropertyGraph};
use crate::plan::{ImplementationPlan, PlannedProperty, ResourceStep, StepAction};

/// Value hint when the delta names no specific dependency.
const MANUAL_HINT: &str = "CONFIGURE APPROPRIATELY";

/// Edges of `pattern` whose endpoint pair `current` does not cover, with
/// nodes left bare by the removal pruned away.
pub fn delta_graph(current: &PropertyGraph, pattern: &PropertyGraph) -> PropertyGraph {
    let mut delta = pattern.clone();
    delta.retain_edges(|edge| !current.has_edge_between(&edge.from, &edge.to));
    delta.prune_isolated();
    delta
}

/// Renders the plan that closes the gap between a resource's configuration
/// and one capability pattern.
///
/// A pattern already covered yields an empty plan. The converse does not
/// hold: a delta made up purely of deeper property refinements has no
/// resource step to emit, and the plan stays empty while the capability is
/// still unimplemented.
pub fn implementation_plan(
    current: &PropertyGraph,
    pattern: &PropertyGraph,
) -> ImplementationPlan {
    let delta = delta_graph(current, pattern);

    let mut resources = Vec::new();
    for node in reverse_topological(&delta) {
        if delta.node_kind(&node) != Some(NodeKind::Resource) {
            continue;
        }
        resources.push(resource_step(&delta, &node));
    }
    ImplementationPlan { resources }
}

/// Nodes ordered so every edge's target precedes its source, ties broken
/// by node order. Catalogue patterns are validated acyclic, so the order
/// covers every node of a delta.
fn reverse_topological(graph: &PropertyGraph) -> Vec<NodeId> {
    let mut pending: BTreeMap<NodeId, usize> = graph
        .nodes()
        .map(|(id, _)| (id.clone(), graph.out_edges(id).count()))
        .collect();
    let mut ready: BTreeSet<NodeId> = pending
        .iter()
        .filter(|(_, remaining)| **remaining == 0)
        .map(|(id, _)| id.clone())
        .collect();

    let mut order = Vec::with_capacity(pending.len());
    while let Some(node) = ready.pop_first() {
        pending.remove(&node);
        for edge in graph.in_edges(&node) {
            if let Some(remaining) = pending.get_mut(&edge.from) {
                *remaining -= 1;
                if *remaining == 0 {
                    ready.insert(edge.from.clone());
                }
            }
        }
        order.push(node);
    }
    order
}

fn resource_step(delta: &PropertyGraph, resource: &NodeId) -> ResourceStep {
    let action = if resource.own {
        StepAction::AddProperties
    } else {
        StepAction::NewResource
    };

    let prefix = format!("{}-", resource.label);
    let mut gaps: Vec<(&str, &NodeId)> = delta
        .nodes()
        .filter(|(_, kind)| *kind == NodeKind::Property)
        .filter_map(|(node, _)| {
            node.label
                .strip_prefix(&prefix)
                .map(|name| (name, node))
        })
        .collect();
    gaps.sort_by(|(_, a), (_, b)| a.label.cmp(&b.label).then(a.own.cmp(&b.own)));

    let properties = gaps
        .into_iter()
        .map(|(name, node)| PlannedProperty {
            name: name.to_string(),
            value: property_hint(delta, node),
        })
        .collect();

    ResourceStep {
        resource_type: resource.label.clone(),
        action,
        properties,
    }
}

/// Hint for a property's value: the resource it uses when the delta names
/// one, a manual placeholder otherwise.
fn property_hint(delta: &PropertyGraph, property: &NodeId) -> String {
    delta
        .out_edges(property)
        .find(|edge| edge.kind == EdgeKind::UsesOtherResourceTo)
        .map(|edge| format!("ARN of {{{}}}", edge.to.label))
        .unwrap_or_else(|| MANUAL_HINT.to_string())
}
