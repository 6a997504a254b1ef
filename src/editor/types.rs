use crate::graph::Position;
use crate::registry::NodeCategory;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Node payload as stored by the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorNodeData {
    #[serde(rename = "nodeType", alias = "node_type")]
    pub node_type: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub config: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<NodeCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Canvas node with id, layout and nesting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorNode {
    pub id: String,
    /// Renderer kind used by the canvas (e.g. `"custom"`, `"group"`); not semantic.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub renderer: Option<String>,
    #[serde(default)]
    pub position: Position,
    #[serde(
        rename = "parentNode",
        alias = "parentId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_node: Option<String>,
    pub data: EditorNodeData,
}

/// Canvas edge connecting nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorEdge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    /// `"success"` or `"error"`; missing means `"success"`.
    #[serde(
        rename = "sourceHandle",
        alias = "source_handle",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub source_handle: Option<String>,
}

/// Complete canvas document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorDocument {
    #[serde(default)]
    pub nodes: Vec<EditorNode>,
    #[serde(default)]
    pub edges: Vec<EditorEdge>,
}
