use gapscan_core::{EdgeKind, NodeId, NodeKind, PropertyGraph};
use proptest::prelude::*;

fn own(label: &str) -> NodeId {
    NodeId::own(label)
}

fn aux(label: &str) -> NodeId {
    NodeId::auxiliary(label)
}

fn graph_from(edges: &[(NodeId, NodeId, EdgeKind)]) -> PropertyGraph {
    let mut graph = PropertyGraph::new();
    for (from, to, kind) in edges {
        graph.add_edge(from.clone(), to.clone(), *kind);
    }
    graph
}

#[test]
fn test_template_with_extra_edges_still_covers() {
    let pattern = graph_from(&[(own("X"), own("X-A"), EdgeKind::HasSubproperty)]);
    let template = graph_from(&[
        (own("X"), own("X-A"), EdgeKind::HasSubproperty),
        (own("X"), own("X-B"), EdgeKind::HasSubproperty),
        (own("X-B"), own("X-B-C"), EdgeKind::HasSubproperty),
    ]);

    assert!(template.covers(&pattern));
    assert!(!pattern.covers(&template));
}

#[test]
fn test_auxiliary_requirements_never_covered_by_own_configuration() {
    let mut pattern = PropertyGraph::new();
    pattern.add_node(own("X"), NodeKind::Resource);
    pattern.add_edge(
        aux("Trail"),
        aux("X"),
        EdgeKind::AddsCapabilitiesToResource,
    );

    // The template side only ever produces own-tagged nodes.
    let template = graph_from(&[(own("X"), own("X-A"), EdgeKind::HasSubproperty)]);
    assert!(!template.covers(&pattern));
}

#[test]
fn test_node_retagging_last_kind_wins() {
    let mut graph = PropertyGraph::new();
    graph.add_edge(own("X"), own("X-A"), EdgeKind::HasSubproperty);
    assert_eq!(graph.node_kind(&own("X")), Some(NodeKind::Property));

    graph.add_node(own("X"), NodeKind::Resource);
    assert_eq!(graph.node_kind(&own("X")), Some(NodeKind::Resource));
    assert_eq!(graph.node_count(), 2);
}

fn node_strategy() -> impl Strategy<Value = NodeId> {
    (any::<bool>(), 0..6usize).prop_map(|(own, index)| {
        let label = ["A", "B", "C", "D", "E", "F"][index];
        if own {
            NodeId::own(label)
        } else {
            NodeId::auxiliary(label)
        }
    })
}

fn edge_kind_strategy() -> impl Strategy<Value = EdgeKind> {
    prop_oneof![
        Just(EdgeKind::HasSubproperty),
        Just(EdgeKind::UsesOtherResourceTo),
        Just(EdgeKind::CanBeUsedTo),
        Just(EdgeKind::AddsCapabilitiesToResource),
        Just(EdgeKind::EnablesInternalCapability),
        Just(EdgeKind::ProvidesCapability),
    ]
}

fn edges_strategy() -> impl Strategy<Value = Vec<(NodeId, NodeId, EdgeKind)>> {
    proptest::collection::vec(
        (node_strategy(), node_strategy(), edge_kind_strategy()),
        0..24,
    )
}

proptest! {
    #[test]
    fn covers_is_reflexive(edges in edges_strategy()) {
        let graph = graph_from(&edges);
        prop_assert!(graph.covers(&graph));
    }

    #[test]
    fn covers_any_subset_of_own_edges(
        edges in edges_strategy(),
        mask in proptest::collection::vec(any::<bool>(), 24),
    ) {
        let graph = graph_from(&edges);
        let subset: Vec<_> = edges
            .iter()
            .zip(&mask)
            .filter(|(_, keep)| **keep)
            .map(|(edge, _)| edge.clone())
            .collect();
        prop_assert!(graph.covers(&graph_from(&subset)));
    }

    #[test]
    fn covers_reduces_to_endpoint_set_containment(
        template_edges in edges_strategy(),
        pattern_edges in edges_strategy(),
    ) {
        let template = graph_from(&template_edges);
        let pattern = graph_from(&pattern_edges);

        let contained = pattern_edges.iter().all(|(from, to, _)| {
            template_edges
                .iter()
                .any(|(tf, tt, _)| tf == from && tt == to)
        });
        prop_assert_eq!(template.covers(&pattern), contained);
    }

    #[test]
    fn edge_membership_matches_linear_scan(
        edges in edges_strategy(),
        probe_from in node_strategy(),
        probe_to in node_strategy(),
    ) {
        let graph = graph_from(&edges);
        let expected = edges
            .iter()
            .any(|(from, to, _)| *from == probe_from && *to == probe_to);
        prop_assert_eq!(graph.has_edge_between(&probe_from, &probe_to), expected);
    }
}
