use crate::registry::{NodeCategory, NodeTemplate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// The branch an edge represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    Success,
    Error,
}

impl Handle {
    pub const ALL: [Handle; 2] = [Handle::Success, Handle::Error];

    pub fn as_str(&self) -> &'static str {
        match self {
            Handle::Success => "success",
            Handle::Error => "error",
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Handle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Handle::Success),
            "error" => Ok(Handle::Error),
            other => Err(format!("unknown handle '{}'", other)),
        }
    }
}

/// Canvas coordinates. Carried through compilation but never interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A node as edited by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    /// Display name, also the key other nodes use in `${Label.field}` expressions.
    pub label: String,
    #[serde(default)]
    pub config: Map<String, Value>,
    pub category: NodeCategory,
    #[serde(default)]
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Free-form note shown in the editor; carried through compilation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl GraphNode {
    pub fn new(id: &str, node_type: &str, category: NodeCategory, label: &str) -> Self {
        Self {
            id: id.to_string(),
            node_type: node_type.to_string(),
            label: label.to_string(),
            config: Map::new(),
            category,
            position: Position::default(),
            parent_id: None,
            description: None,
        }
    }

    /// Creates a node seeded with the template's default configuration.
    pub fn from_template(id: &str, template: &NodeTemplate, label: &str) -> Self {
        Self {
            config: template.default_config.clone(),
            ..Self::new(id, &template.node_type, template.category, label)
        }
    }

    pub fn with_config(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.config.insert(key.to_string(), value.into());
        self
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Position::new(x, y);
        self
    }

    pub fn with_parent(mut self, parent_id: &str) -> Self {
        self.parent_id = Some(parent_id.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// A success or error continuation from `source` to `target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub source_handle: Handle,
}

impl Edge {
    /// Creates an edge with the canonical id `{source}-{handle}-{target}`.
    ///
    /// The canonical id is not guaranteed unique when node ids contain hyphens; use
    /// `GraphModel::connect` to get a free id.
    pub fn new(source: &str, target: &str, handle: Handle) -> Self {
        Self {
            id: format!("{}-{}-{}", source, handle, target),
            source: source.to_string(),
            target: target.to_string(),
            source_handle: handle,
        }
    }

    pub fn with_id(id: &str, source: &str, target: &str, handle: Handle) -> Self {
        Self {
            id: id.to_string(),
            ..Self::new(source, target, handle)
        }
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}
