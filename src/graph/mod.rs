use crate::error::GraphError;
use crate::registry::is_container;
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::VecDeque;
use tracing::debug;

pub mod conversion;
mod index;
mod node;

use index::GraphIndex;

pub use conversion::*;
pub use node::*;

/// What happens to the children of a container node when it is removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalPolicy {
    /// Children move up to the removed node's parent, or to the top level.
    #[default]
    Reparent,
    /// Every descendant is removed along with the node.
    Cascade,
}

/// The nodes and edges of a bot as edited.
///
/// Nodes and edges are kept in creation order; every ordered query (top-level nodes,
/// children, incoming edges) follows that order. All mutators check the graph invariants
/// and leave the graph untouched on error. Id lookups go through a hash index that is
/// rebuilt on deserialization and never serialized.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "GraphParts")]
pub struct GraphModel {
    nodes: Vec<GraphNode>,
    edges: Vec<Edge>,
    #[serde(skip)]
    index: GraphIndex,
}

#[derive(Deserialize)]
struct GraphParts {
    #[serde(default)]
    nodes: Vec<GraphNode>,
    #[serde(default)]
    edges: Vec<Edge>,
}

impl From<GraphParts> for GraphModel {
    fn from(parts: GraphParts) -> Self {
        let index = GraphIndex::build(&parts.nodes, &parts.edges);
        Self {
            nodes: parts.nodes,
            edges: parts.edges,
            index,
        }
    }
}

impl PartialEq for GraphModel {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes && self.edges == other.edges
    }
}

impl GraphModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph through the regular mutators.
    ///
    /// Nodes may appear in any order: each one is inserted once its parent exists, and
    /// siblings keep their relative order.
    pub fn from_parts(nodes: Vec<GraphNode>, edges: Vec<Edge>) -> Result<Self, GraphError> {
        let mut graph = GraphModel::new();
        let mut pending: VecDeque<GraphNode> = nodes.into();

        while !pending.is_empty() {
            let mut deferred = VecDeque::new();
            let before = pending.len();
            while let Some(node) = pending.pop_front() {
                let ready = match &node.parent_id {
                    None => true,
                    Some(parent) => graph.contains_node(parent),
                };
                if ready {
                    graph.add_node(node)?;
                } else {
                    deferred.push_back(node);
                }
            }
            if deferred.len() == before {
                return Err(Self::unplaceable(&deferred));
            }
            pending = deferred;
        }

        for edge in edges {
            graph.add_edge(edge)?;
        }
        Ok(graph)
    }

    /// Explains why none of `stuck` could be inserted: a missing parent or a parent cycle.
    fn unplaceable(stuck: &VecDeque<GraphNode>) -> GraphError {
        let waiting: AHashSet<&str> = stuck.iter().map(|n| n.id.as_str()).collect();
        for node in stuck {
            if let Some(parent) = &node.parent_id {
                if !waiting.contains(parent.as_str()) {
                    return GraphError::NodeNotFound(parent.clone());
                }
            }
        }
        let node_id = stuck.front().map(|n| n.id.clone()).unwrap_or_default();
        GraphError::InvalidContainment {
            node_id,
            message: "parent chain forms a cycle".to_string(),
        }
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.index.nodes.get(id).and_then(|&i| self.nodes.get(i))
    }

    pub fn node_by_label(&self, label: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.label == label)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.index.edges.get(id).and_then(|&i| self.edges.get(i))
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.index.nodes.contains_key(id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes without a parent, in creation order.
    pub fn top_level(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(|n| n.parent_id.is_none())
    }

    /// Direct children of `parent_id`, in creation order.
    pub fn children_of<'a>(&'a self, parent_id: &'a str) -> impl Iterator<Item = &'a GraphNode> {
        self.index
            .children
            .get(parent_id)
            .into_iter()
            .flatten()
            .filter_map(|&i| self.nodes.get(i))
    }

    /// The edge leaving `source` on `handle`, if any.
    pub fn outgoing(&self, source: &str, handle: Handle) -> Option<&Edge> {
        self.index
            .outgoing(source, handle)
            .and_then(|i| self.edges.get(i))
    }

    /// Edges arriving at `target`, in creation order.
    pub fn incoming<'a>(&'a self, target: &'a str) -> impl Iterator<Item = &'a Edge> {
        self.index
            .incoming
            .get(target)
            .into_iter()
            .flatten()
            .filter_map(|&i| self.edges.get(i))
    }

    pub fn add_node(&mut self, node: GraphNode) -> Result<(), GraphError> {
        if node.id.trim().is_empty() {
            return Err(GraphError::BlankNodeId(node.id));
        }
        if self.contains_node(&node.id) {
            return Err(GraphError::DuplicateNodeId(node.id));
        }
        if let Some(parent_id) = &node.parent_id {
            self.check_parent(&node.id, parent_id)?;
        }
        debug!(node_id = %node.id, node_type = %node.node_type, "node added");
        self.index.insert_node(self.nodes.len(), &node);
        self.nodes.push(node);
        Ok(())
    }

    /// Removes a node, every edge touching it, and handles its children per `policy`.
    ///
    /// Returns the removed nodes, the requested node first.
    pub fn remove_node(
        &mut self,
        id: &str,
        policy: RemovalPolicy,
    ) -> Result<Vec<GraphNode>, GraphError> {
        let node = self
            .node(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))?;
        let grandparent = node.parent_id.clone();

        let mut doomed: AHashSet<String> = AHashSet::new();
        doomed.insert(id.to_string());
        match policy {
            RemovalPolicy::Cascade => {
                doomed.extend(self.descendants_of(id));
            }
            RemovalPolicy::Reparent => {
                for child in self
                    .nodes
                    .iter_mut()
                    .filter(|n| n.parent_id.as_deref() == Some(id))
                {
                    child.parent_id = grandparent.clone();
                }
            }
        }

        let (removed, kept): (Vec<GraphNode>, Vec<GraphNode>) = std::mem::take(&mut self.nodes)
            .into_iter()
            .partition(|n| doomed.contains(&n.id));
        self.nodes = kept;
        self.edges
            .retain(|e| !doomed.contains(&e.source) && !doomed.contains(&e.target));
        self.index = GraphIndex::build(&self.nodes, &self.edges);

        debug!(node_id = %id, ?policy, removed = removed.len(), "node removed");
        let (first, rest): (Vec<GraphNode>, Vec<GraphNode>) =
            removed.into_iter().partition(|n| n.id == id);
        Ok(first.into_iter().chain(rest).collect())
    }

    pub fn add_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        for endpoint in [&edge.source, &edge.target] {
            if !self.contains_node(endpoint) {
                return Err(GraphError::DanglingEdgeReference {
                    edge_id: edge.id.clone(),
                    missing_node_id: endpoint.clone(),
                });
            }
        }
        if self.outgoing(&edge.source, edge.source_handle).is_some() {
            return Err(GraphError::DuplicateOutgoingEdge {
                source_node_id: edge.source,
                handle: edge.source_handle,
            });
        }
        if self.edge(&edge.id).is_some() {
            return Err(GraphError::DuplicateEdgeId(edge.id));
        }
        debug!(edge_id = %edge.id, handle = %edge.source_handle, "edge added");
        self.index.insert_edge(self.edges.len(), &edge);
        self.edges.push(edge);
        Ok(())
    }

    /// Connects `source` to `target` on `handle` and returns the new edge id.
    ///
    /// The id is the canonical `{source}-{handle}-{target}`. Node ids may contain hyphens,
    /// so two different edges can render the same canonical id; the later one then gets
    /// the first free numeric suffix (`-2`, `-3`, ...).
    pub fn connect(
        &mut self,
        source: &str,
        target: &str,
        handle: Handle,
    ) -> Result<String, GraphError> {
        let mut edge = Edge::new(source, target, handle);
        edge.id = self.unused_edge_id(edge.id);
        let id = edge.id.clone();
        self.add_edge(edge)?;
        Ok(id)
    }

    fn unused_edge_id(&self, base: String) -> String {
        if self.edge(&base).is_none() {
            return base;
        }
        let mut suffix = 2;
        loop {
            let candidate = format!("{}-{}", base, suffix);
            if self.edge(&candidate).is_none() {
                return candidate;
            }
            suffix += 1;
        }
    }

    pub fn remove_edge(&mut self, id: &str) -> Result<Edge, GraphError> {
        let position = *self
            .index
            .edges
            .get(id)
            .ok_or_else(|| GraphError::EdgeNotFound(id.to_string()))?;
        let edge = self.edges.remove(position);
        self.index.rebuild_edges(&self.edges);
        Ok(edge)
    }

    /// Moves a node into `parent_id`, or to the top level when `None`.
    pub fn set_parent(&mut self, node_id: &str, parent_id: Option<&str>) -> Result<(), GraphError> {
        if !self.contains_node(node_id) {
            return Err(GraphError::NodeNotFound(node_id.to_string()));
        }
        if let Some(parent_id) = parent_id {
            self.check_parent(node_id, parent_id)?;
        }
        self.node_entry(node_id)?.parent_id = parent_id.map(str::to_string);
        self.index = GraphIndex::build(&self.nodes, &self.edges);
        Ok(())
    }

    pub fn set_label(&mut self, node_id: &str, label: &str) -> Result<(), GraphError> {
        self.node_entry(node_id)?.label = label.to_string();
        Ok(())
    }

    pub fn set_position(&mut self, node_id: &str, position: Position) -> Result<(), GraphError> {
        self.node_entry(node_id)?.position = position;
        Ok(())
    }

    /// Mutable access to a node's configuration map.
    pub fn config_mut(&mut self, node_id: &str) -> Result<&mut Map<String, Value>, GraphError> {
        Ok(&mut self.node_entry(node_id)?.config)
    }

    /// Re-verifies every invariant and returns all violations.
    ///
    /// Graphs built through the mutators always pass; this exists for graphs that arrived
    /// through deserialization.
    pub fn check_structure(&self) -> Vec<GraphError> {
        let mut errors = Vec::new();

        for node in self.nodes.iter().filter(|n| n.id.trim().is_empty()) {
            errors.push(GraphError::BlankNodeId(node.id.clone()));
        }
        for id in self.nodes.iter().map(|n| &n.id).duplicates() {
            errors.push(GraphError::DuplicateNodeId(id.clone()));
        }
        for id in self.edges.iter().map(|e| &e.id).duplicates() {
            errors.push(GraphError::DuplicateEdgeId(id.clone()));
        }

        let index: AHashMap<&str, &GraphNode> =
            self.nodes.iter().map(|n| (n.id.as_str(), n)).collect();

        for edge in &self.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !index.contains_key(endpoint.as_str()) {
                    errors.push(GraphError::DanglingEdgeReference {
                        edge_id: edge.id.clone(),
                        missing_node_id: endpoint.clone(),
                    });
                }
            }
        }
        for (source, handle) in self
            .edges
            .iter()
            .map(|e| (&e.source, e.source_handle))
            .duplicates()
        {
            errors.push(GraphError::DuplicateOutgoingEdge {
                source_node_id: source.clone(),
                handle,
            });
        }

        for node in &self.nodes {
            let Some(parent_id) = &node.parent_id else {
                continue;
            };
            match index.get(parent_id.as_str()) {
                None => errors.push(GraphError::InvalidContainment {
                    node_id: node.id.clone(),
                    message: format!("parent '{}' does not exist", parent_id),
                }),
                Some(parent) if !is_container(&parent.node_type) => {
                    errors.push(GraphError::InvalidContainment {
                        node_id: node.id.clone(),
                        message: format!(
                            "parent '{}' has non-container type '{}'",
                            parent_id, parent.node_type
                        ),
                    })
                }
                Some(_) => {}
            }
            if self.ancestors_of(parent_id).any(|a| a == node.id) || *parent_id == node.id {
                errors.push(GraphError::InvalidContainment {
                    node_id: node.id.clone(),
                    message: "parent chain forms a cycle".to_string(),
                });
            }
        }
        errors
    }

    fn node_entry(&mut self, node_id: &str) -> Result<&mut GraphNode, GraphError> {
        self.index
            .nodes
            .get(node_id)
            .and_then(|&i| self.nodes.get_mut(i))
            .ok_or_else(|| GraphError::NodeNotFound(node_id.to_string()))
    }

    /// Checks that `parent_id` may own `child_id`.
    fn check_parent(&self, child_id: &str, parent_id: &str) -> Result<(), GraphError> {
        let parent = self
            .node(parent_id)
            .ok_or_else(|| GraphError::NodeNotFound(parent_id.to_string()))?;
        if parent_id == child_id {
            return Err(GraphError::InvalidContainment {
                node_id: child_id.to_string(),
                message: "a node cannot contain itself".to_string(),
            });
        }
        if !is_container(&parent.node_type) {
            return Err(GraphError::InvalidContainment {
                node_id: child_id.to_string(),
                message: format!(
                    "parent '{}' has non-container type '{}'",
                    parent_id, parent.node_type
                ),
            });
        }
        if self.ancestors_of(parent_id).any(|a| a == child_id) {
            return Err(GraphError::InvalidContainment {
                node_id: child_id.to_string(),
                message: format!("'{}' is nested inside it", parent_id),
            });
        }
        Ok(())
    }

    /// Walks the parent chain upwards from `node_id` (excluding it). Stops on a repeat.
    fn ancestors_of<'a>(&'a self, node_id: &str) -> impl Iterator<Item = &'a str> {
        let mut seen: AHashSet<&str> = AHashSet::new();
        let mut current = self.node(node_id).and_then(|n| n.parent_id.as_deref());
        std::iter::from_fn(move || {
            let id = current?;
            if !seen.insert(id) {
                return None;
            }
            current = self.node(id).and_then(|n| n.parent_id.as_deref());
            Some(id)
        })
    }

    /// Every node nested below `node_id`, breadth-first.
    fn descendants_of(&self, node_id: &str) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        let mut seen: AHashSet<&str> = AHashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::from([node_id]);
        seen.insert(node_id);
        while let Some(current) = queue.pop_front() {
            for child in self.children_of(current) {
                if seen.insert(child.id.as_str()) {
                    found.push(child.id.clone());
                    queue.push_back(child.id.as_str());
                }
            }
        }
        found
    }
}
