//! Directed multigraphs over configuration nodes.
//!
//! One graph type serves both sides of the analysis: template graphs built
//! from a resource's declared configuration, and capability pattern graphs
//! built from catalogue records. Nodes are keyed by [`NodeId`] and edges
//! live in a sorted set of `(from, to, kind)` triples, so iteration order
//! and everything derived from it is deterministic across processes.

use std::collections::{BTreeMap, BTreeSet};

mod node;

pub use node::{child_label, EdgeKind, NodeId, NodeKind};

/// A directed edge between two configuration nodes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub kind: EdgeKind,
}

/// Directed multigraph of configuration nodes.
///
/// Parallel edges between the same endpoints are allowed when their kinds
/// differ. Edge membership queries ([`has_edge_between`], [`covers`]) are
/// endpoint-based and ignore kinds.
///
/// [`has_edge_between`]: PropertyGraph::has_edge_between
/// [`covers`]: PropertyGraph::covers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyGraph {
    nodes: BTreeMap<NodeId, NodeKind>,
    edges: BTreeSet<Edge>,
}

impl PropertyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or retags a node. The most recent kind wins.
    pub fn add_node(&mut self, id: NodeId, kind: NodeKind) {
        self.nodes.insert(id, kind);
    }

    /// Inserts an edge. Endpoints missing from the node table are created
    /// as [`NodeKind::Property`] until tagged otherwise.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, kind: EdgeKind) {
        self.nodes.entry(from.clone()).or_insert(NodeKind::Property);
        self.nodes.entry(to.clone()).or_insert(NodeKind::Property);
        self.edges.insert(Edge { from, to, kind });
    }

    pub fn has_node(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node_kind(&self, id: &NodeId) -> Option<NodeKind> {
        self.nodes.get(id).copied()
    }

    /// True when at least one edge of any kind connects `from` to `to`.
    ///
    /// This is a range probe on the sorted edge set, not a scan.
    pub fn has_edge_between(&self, from: &NodeId, to: &NodeId) -> bool {
        // Edge order is (from, to, kind) and HasSubproperty is the smallest
        // kind, so the probe lands on the first parallel edge if any exists.
        let lo = Edge {
            from: from.clone(),
            to: to.clone(),
            kind: EdgeKind::HasSubproperty,
        };
        self.edges
            .range(lo..)
            .next()
            .map(|e| e.from == *from && e.to == *to)
            .unwrap_or(false)
    }

    /// All edges leaving `from`, in sorted order.
    pub fn out_edges<'a>(&'a self, from: &NodeId) -> impl Iterator<Item = &'a Edge> + 'a {
        let lo = Edge {
            from: from.clone(),
            to: NodeId::auxiliary(""),
            kind: EdgeKind::HasSubproperty,
        };
        let from = from.clone();
        self.edges.range(lo..).take_while(move |e| e.from == from)
    }

    /// All edges arriving at `to`, in sorted order.
    pub fn in_edges<'a>(&'a self, to: &NodeId) -> impl Iterator<Item = &'a Edge> + 'a {
        let to = to.clone();
        self.edges.iter().filter(move |e| e.to == to)
    }

    /// Removes a node together with every incident edge.
    pub fn remove_node(&mut self, id: &NodeId) {
        self.nodes.remove(id);
        self.edges.retain(|e| e.from != *id && e.to != *id);
    }

    /// Keeps only the edges for which `keep` returns true. Nodes are left
    /// in place; call [`prune_isolated`] to drop the ones that end up bare.
    ///
    /// [`prune_isolated`]: PropertyGraph::prune_isolated
    pub fn retain_edges(&mut self, mut keep: impl FnMut(&Edge) -> bool) {
        self.edges.retain(|e| keep(e));
    }

    /// Drops every node with no incident edges.
    pub fn prune_isolated(&mut self) {
        let mut connected = BTreeSet::new();
        for edge in &self.edges {
            connected.insert(edge.from.clone());
            connected.insert(edge.to.clone());
        }
        self.nodes.retain(|id, _| connected.contains(id));
    }

    /// True when every edge of `pattern` has a counterpart here between the
    /// same endpoints, of any kind. An edgeless pattern is covered
    /// vacuously.
    pub fn covers(&self, pattern: &PropertyGraph) -> bool {
        pattern
            .edges()
            .all(|e| self.has_edge_between(&e.from, &e.to))
    }

    /// True when the graph contains no directed cycle.
    pub fn is_acyclic(&self) -> bool {
        let mut in_degree: BTreeMap<&NodeId, usize> =
            self.nodes.keys().map(|id| (id, 0)).collect();
        for edge in &self.edges {
            if let Some(d) = in_degree.get_mut(&edge.to) {
                *d += 1;
            }
        }

        let mut ready: Vec<&NodeId> = in_degree
            .iter()
            .filter(|(_, d)| **d == 0)
            .map(|(id, _)| *id)
            .collect();
        let mut visited = 0usize;
        while let Some(id) = ready.pop() {
            visited += 1;
            for edge in self.out_edges(id) {
                if let Some(d) = in_degree.get_mut(&edge.to) {
                    *d -= 1;
                    if *d == 0 {
                        ready.push(self.node_key(&edge.to));
                    }
                }
            }
        }
        visited == self.nodes.len()
    }

    /// Canonical reference to a node key held by the graph itself.
    fn node_key<'a>(&'a self, id: &'a NodeId) -> &'a NodeId {
        self.nodes
            .get_key_value(id)
            .map(|(key, _)| key)
            .unwrap_or(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (&NodeId, NodeKind)> {
        self.nodes.iter().map(|(id, kind)| (id, *kind))
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn own(label: &str) -> NodeId {
        NodeId::own(label)
    }

    #[test]
    fn test_add_edge_creates_property_endpoints() {
        let mut graph = PropertyGraph::new();
        graph.add_node(own("X"), NodeKind::Resource);
        graph.add_edge(own("X"), own("X-A"), EdgeKind::HasSubproperty);

        assert_eq!(graph.node_kind(&own("X")), Some(NodeKind::Resource));
        assert_eq!(graph.node_kind(&own("X-A")), Some(NodeKind::Property));
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_parallel_edges_differ_by_kind() {
        let mut graph = PropertyGraph::new();
        graph.add_edge(own("X"), own("Y"), EdgeKind::HasSubproperty);
        graph.add_edge(own("X"), own("Y"), EdgeKind::UsesOtherResourceTo);
        graph.add_edge(own("X"), own("Y"), EdgeKind::HasSubproperty);

        assert_eq!(graph.edge_count(), 2);
        assert!(graph.has_edge_between(&own("X"), &own("Y")));
        assert!(!graph.has_edge_between(&own("Y"), &own("X")));
    }

    #[test]
    fn test_edge_membership_ignores_kind() {
        let mut template = PropertyGraph::new();
        template.add_edge(own("X"), own("X-A"), EdgeKind::HasSubproperty);

        let mut pattern = PropertyGraph::new();
        pattern.add_edge(own("X"), own("X-A"), EdgeKind::UsesOtherResourceTo);

        assert!(template.covers(&pattern));
    }

    #[test]
    fn test_covers_respects_ownership() {
        let mut template = PropertyGraph::new();
        template.add_edge(own("X"), own("X-A"), EdgeKind::HasSubproperty);

        let mut pattern = PropertyGraph::new();
        pattern.add_edge(
            NodeId::auxiliary("X"),
            NodeId::auxiliary("X-A"),
            EdgeKind::HasSubproperty,
        );

        assert!(!template.covers(&pattern));
    }

    #[test]
    fn test_empty_pattern_is_covered_vacuously() {
        let template = PropertyGraph::new();
        let pattern = PropertyGraph::new();
        assert!(template.covers(&pattern));
    }

    #[test]
    fn test_remove_node_drops_incident_edges() {
        let mut graph = PropertyGraph::new();
        graph.add_edge(own("X"), own("Y"), EdgeKind::HasSubproperty);
        graph.add_edge(own("Y"), own("Z"), EdgeKind::HasSubproperty);
        graph.remove_node(&own("Y"));

        assert!(!graph.has_node(&own("Y")));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_prune_isolated_keeps_connected_nodes() {
        let mut graph = PropertyGraph::new();
        graph.add_node(own("Lone"), NodeKind::Resource);
        graph.add_edge(own("X"), own("Y"), EdgeKind::HasSubproperty);
        graph.prune_isolated();

        assert!(!graph.has_node(&own("Lone")));
        assert!(graph.has_node(&own("X")));
        assert!(graph.has_node(&own("Y")));
    }

    #[test]
    fn test_out_and_in_edges() {
        let mut graph = PropertyGraph::new();
        graph.add_edge(own("X"), own("X-A"), EdgeKind::HasSubproperty);
        graph.add_edge(own("X"), own("X-B"), EdgeKind::HasSubproperty);
        graph.add_edge(own("W"), own("X"), EdgeKind::UsesOtherResourceTo);

        let outs: Vec<_> = graph.out_edges(&own("X")).map(|e| e.to.clone()).collect();
        assert_eq!(outs, vec![own("X-A"), own("X-B")]);

        let ins: Vec<_> = graph.in_edges(&own("X")).map(|e| e.from.clone()).collect();
        assert_eq!(ins, vec![own("W")]);
    }

    #[test]
    fn test_acyclicity() {
        let mut dag = PropertyGraph::new();
        dag.add_edge(own("A"), own("B"), EdgeKind::HasSubproperty);
        dag.add_edge(own("B"), own("C"), EdgeKind::HasSubproperty);
        dag.add_edge(own("A"), own("C"), EdgeKind::UsesOtherResourceTo);
        assert!(dag.is_acyclic());

        let mut cyclic = dag.clone();
        cyclic.add_edge(own("C"), own("A"), EdgeKind::HasSubproperty);
        assert!(!cyclic.is_acyclic());

        let mut self_loop = PropertyGraph::new();
        self_loop.add_edge(own("A"), own("A"), EdgeKind::UsesOtherResourceTo);
        assert!(!self_loop.is_acyclic());
    }
}
