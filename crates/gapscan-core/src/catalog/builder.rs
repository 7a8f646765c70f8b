//! Canonicalization of raw pattern records into matchable graphs.

use crate::graph::{Edge, EdgeKind, NodeId, NodeKind, PropertyGraph};

use super::error::CatalogError;
use super::raw::{RawConfiguration, RawNode, RawRecord};

/// Builds the canonical pattern graph for one raw record.
///
/// Own-configuration endpoints are tagged as the analyzed resource's own
/// when they are resources or properties; every auxiliary-side endpoint is
/// tagged auxiliary. Capability-granting edges stay out of the graph on
/// their home side (`EnablesInternalCapability` for own configuration,
/// `ProvidesCapability` for auxiliary), UseCase indirections are collapsed
/// into direct `UsesOtherResourceTo` edges, and the result must be acyclic.
pub fn pattern_graph(record: &RawRecord) -> Result<PropertyGraph, CatalogError> {
    let mut graph = PropertyGraph::new();

    // A pattern whose own side carries no structural relationship still
    // names its resource, and such a pattern matches vacuously.
    for node in &record.own_configuration.nodes {
        if node.kind == NodeKind::Resource {
            graph.add_node(NodeId::own(&node.label), NodeKind::Resource);
        }
    }

    add_relationships(
        &mut graph,
        &record.own_configuration,
        EdgeKind::EnablesInternalCapability,
        own_node_id,
    );
    if let Some(auxiliary) = &record.auxiliary_configuration {
        add_relationships(
            &mut graph,
            auxiliary,
            EdgeKind::ProvidesCapability,
            auxiliary_node_id,
        );
    }

    collapse_use_cases(&mut graph)?;

    if !graph.is_acyclic() {
        return Err(CatalogError::malformed("pattern graph contains a cycle"));
    }
    Ok(graph)
}

fn add_relationships(
    graph: &mut PropertyGraph,
    configuration: &RawConfiguration,
    excluded: EdgeKind,
    node_id: fn(&RawNode) -> NodeId,
) {
    for relationship in &configuration.relationships {
        if relationship.kind == excluded {
            continue;
        }
        let from = node_id(&relationship.from);
        let to = node_id(&relationship.to);
        graph.add_edge(from.clone(), to.clone(), relationship.kind);
        graph.add_node(from, relationship.from.kind);
        graph.add_node(to, relationship.to.kind);
    }
}

/// Own-side tagging: only resources and properties belong to the analyzed
/// resource; use cases and capabilities stay auxiliary even here.
fn own_node_id(node: &RawNode) -> NodeId {
    match node.kind {
        NodeKind::Resource | NodeKind::Property => NodeId::own(&node.label),
        NodeKind::UseCase | NodeKind::Capability => NodeId::auxiliary(&node.label),
    }
}

fn auxiliary_node_id(node: &RawNode) -> NodeId {
    NodeId::auxiliary(&node.label)
}

/// Replaces every UseCase indirection with direct `UsesOtherResourceTo`
/// edges onto its provider.
fn collapse_use_cases(graph: &mut PropertyGraph) -> Result<(), CatalogError> {
    let use_cases: Vec<NodeId> = graph
        .nodes()
        .filter(|(_, kind)| *kind == NodeKind::UseCase)
        .map(|(id, _)| id.clone())
        .collect();

    for use_case in use_cases {
        let incoming: Vec<Edge> = graph.in_edges(&use_case).cloned().collect();

        let mut providers = incoming
            .iter()
            .filter(|edge| edge.kind == EdgeKind::CanBeUsedTo);
        let provider = match (providers.next(), providers.next()) {
            (Some(edge), None) => edge.from.clone(),
            (None, _) => {
                return Err(CatalogError::malformed(format!(
                    "use case {} has no CanBeUsedTo provider",
                    use_case
                )))
            }
            (Some(_), Some(_)) => {
                return Err(CatalogError::malformed(format!(
                    "use case {} has multiple CanBeUsedTo providers",
                    use_case
                )))
            }
        };

        for edge in &incoming {
            if edge.kind == EdgeKind::UsesOtherResourceTo {
                graph.add_edge(
                    edge.from.clone(),
                    provider.clone(),
                    EdgeKind::UsesOtherResourceTo,
                );
            }
        }
        graph.remove_node(&use_case);
    }
    Ok(())
}
