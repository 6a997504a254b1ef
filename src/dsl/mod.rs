//! The `BotDsl` document: the hierarchical artifact handed to the executor.
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "bot": { "id": "invoice-bot", "name": "Invoice Bot" },
//!   "nodes": [
//!     { "id": "t1", "type": "trigger.manual", "config": {}, "label": "Start",
//!       "position": { "x": 0.0, "y": 0.0 },
//!       "outputs": { "success": "h1", "error": "END" } }
//!   ],
//!   "triggers": ["t1"],
//!   "start_node": "t1"
//! }
//! ```

use crate::graph::{Handle, Position};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

pub mod ai;
pub mod check;

pub use check::{CheckReport, DocumentWarning, check_document};

/// The DSL schema version this crate emits.
pub const DSL_VERSION: &str = "1.0";

/// Sentinel for "no further node on this branch".
pub const END: &str = "END";

/// Where a branch continues: another node, or the end of the flow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Target {
    #[default]
    End,
    Node(String),
}

impl Target {
    pub fn node_id(&self) -> Option<&str> {
        match self {
            Target::End => None,
            Target::Node(id) => Some(id),
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Target::End)
    }
}

impl From<String> for Target {
    fn from(value: String) -> Self {
        if value == END {
            Target::End
        } else {
            Target::Node(value)
        }
    }
}

impl From<Target> for String {
    fn from(target: Target) -> Self {
        match target {
            Target::End => END.to_string(),
            Target::Node(id) => id,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::End => f.write_str(END),
            Target::Node(id) => f.write_str(id),
        }
    }
}

/// The success and error continuations of a node.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodeOutputs {
    pub success: Target,
    pub error: Target,
}

impl NodeOutputs {
    pub fn get(&self, handle: Handle) -> &Target {
        match handle {
            Handle::Success => &self.success,
            Handle::Error => &self.error,
        }
    }

    pub fn set(&mut self, handle: Handle, target: Target) {
        match handle {
            Handle::Success => self.success = target,
            Handle::Error => self.error = target,
        }
    }
}

/// One node of the document. `children` is only present on container nodes that own nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DslNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub config: Map<String, Value>,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub outputs: NodeOutputs,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DslNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BotMetadata {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl BotMetadata {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    String,
    Number,
    Boolean,
    Credential,
    File,
    Json,
}

/// A bot-level variable the executor seeds before the first node runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDefinition {
    #[serde(rename = "type")]
    pub var_type: VariableType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Vault key for credentials, resolved by the executor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The complete DSL document for one bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotDsl {
    pub version: String,
    pub bot: BotMetadata,
    pub nodes: Vec<DslNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub triggers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_node: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, VariableDefinition>,
}

impl BotDsl {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Finds a node anywhere in the document, including nested children.
    pub fn find_node(&self, id: &str) -> Option<&DslNode> {
        self.walk().into_iter().find(|n| n.id == id)
    }

    /// Every node in the document, depth-first, parents before their children.
    pub fn walk(&self) -> Vec<&DslNode> {
        let mut out = Vec::new();
        let mut stack: Vec<&DslNode> = self.nodes.iter().rev().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }
}
