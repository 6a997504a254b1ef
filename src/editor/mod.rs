//! The canvas document format and its conversion to and from `GraphModel`.

use crate::error::ConversionError;
use crate::graph::{Edge, GraphModel, GraphNode, Handle, IntoGraph};
use crate::registry::NodeTemplateRegistry;

mod types;

pub use types::*;

impl EditorDocument {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Renders a graph back into the canvas format, e.g. after loading a DSL document.
    pub fn from_graph(graph: &GraphModel) -> Self {
        let nodes = graph
            .nodes()
            .iter()
            .map(|node| EditorNode {
                id: node.id.clone(),
                renderer: Some("custom".to_string()),
                position: node.position,
                parent_node: node.parent_id.clone(),
                data: EditorNodeData {
                    node_type: node.node_type.clone(),
                    label: node.label.clone(),
                    config: node.config.clone(),
                    category: Some(node.category),
                    description: node.description.clone(),
                },
            })
            .collect();

        let edges = graph
            .edges()
            .iter()
            .map(|edge| EditorEdge {
                id: Some(edge.id.clone()),
                source: edge.source.clone(),
                target: edge.target.clone(),
                source_handle: Some(edge.source_handle.to_string()),
            })
            .collect();

        Self { nodes, edges }
    }
}

/// Categories are taken from the registry. A `category` present in the canvas data must
/// agree with it; edges without an id get the one `GraphModel::connect` assigns.
impl IntoGraph for EditorDocument {
    fn into_graph(self, registry: &NodeTemplateRegistry) -> Result<GraphModel, ConversionError> {
        let mut nodes = Vec::with_capacity(self.nodes.len());
        for raw in self.nodes {
            let category = registry
                .lookup(&raw.data.node_type)
                .map_err(|_| ConversionError::UnknownNodeType {
                    node_id: raw.id.clone(),
                    type_name: raw.data.node_type.clone(),
                })?
                .category;
            if let Some(claimed) = raw.data.category {
                if claimed != category {
                    return Err(ConversionError::CategoryMismatch {
                        node_id: raw.id,
                        node_type: raw.data.node_type,
                        expected: category,
                        actual: claimed,
                    });
                }
            }
            let label = if raw.data.label.is_empty() {
                raw.id.clone()
            } else {
                raw.data.label
            };
            nodes.push(GraphNode {
                id: raw.id,
                node_type: raw.data.node_type,
                label,
                config: raw.data.config,
                category,
                position: raw.position,
                parent_id: raw.parent_node,
                description: raw.data.description,
            });
        }

        let mut graph = GraphModel::from_parts(nodes, Vec::new())?;
        for raw in self.edges {
            let handle = match raw.source_handle.as_deref() {
                None => Handle::Success,
                Some(handle) => handle.parse::<Handle>().map_err(|e| {
                    ConversionError::ValidationError(format!(
                        "edge {} -> {}: {}",
                        raw.source, raw.target, e
                    ))
                })?,
            };
            match raw.id {
                Some(id) => graph.add_edge(Edge::with_id(&id, &raw.source, &raw.target, handle))?,
                None => {
                    graph.connect(&raw.source, &raw.target, handle)?;
                }
            }
        }
        Ok(graph)
    }
}
