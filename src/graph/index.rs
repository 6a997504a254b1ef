use super::{Edge, GraphNode, Handle};
use ahash::AHashMap;

/// Id lookups over the ordered node and edge vectors.
///
/// Positions point into `GraphModel::nodes`/`edges`. When ids are duplicated (only possible
/// in deserialized graphs) the first occurrence is indexed. Lists keep creation order.
#[derive(Debug, Clone, Default)]
pub(super) struct GraphIndex {
    pub(super) nodes: AHashMap<String, usize>,
    pub(super) children: AHashMap<String, Vec<usize>>,
    pub(super) edges: AHashMap<String, usize>,
    pub(super) outgoing: AHashMap<String, [Option<usize>; 2]>,
    pub(super) incoming: AHashMap<String, Vec<usize>>,
}

fn slot(handle: Handle) -> usize {
    match handle {
        Handle::Success => 0,
        Handle::Error => 1,
    }
}

impl GraphIndex {
    pub(super) fn build(nodes: &[GraphNode], edges: &[Edge]) -> Self {
        let mut index = GraphIndex::default();
        for (position, node) in nodes.iter().enumerate() {
            index.insert_node(position, node);
        }
        for (position, edge) in edges.iter().enumerate() {
            index.insert_edge(position, edge);
        }
        index
    }

    pub(super) fn insert_node(&mut self, position: usize, node: &GraphNode) {
        self.nodes.entry(node.id.clone()).or_insert(position);
        if let Some(parent) = &node.parent_id {
            self.children
                .entry(parent.clone())
                .or_default()
                .push(position);
        }
    }

    pub(super) fn insert_edge(&mut self, position: usize, edge: &Edge) {
        self.edges.entry(edge.id.clone()).or_insert(position);
        let slots = self.outgoing.entry(edge.source.clone()).or_default();
        slots[slot(edge.source_handle)].get_or_insert(position);
        self.incoming
            .entry(edge.target.clone())
            .or_default()
            .push(position);
    }

    pub(super) fn outgoing(&self, source: &str, handle: Handle) -> Option<usize> {
        self.outgoing.get(source).and_then(|slots| slots[slot(handle)])
    }

    /// Drops and rebuilds the edge lookups, e.g. after an edge removal shifted positions.
    pub(super) fn rebuild_edges(&mut self, edges: &[Edge]) {
        self.edges.clear();
        self.outgoing.clear();
        self.incoming.clear();
        for (position, edge) in edges.iter().enumerate() {
            self.insert_edge(position, edge);
        }
    }
}
