use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of node types that may own a nested sub-graph.
///
/// Membership is an explicit match on the full node type. A type that merely shares the
/// `control.` prefix (`control.wait`, `control.stop`, ...) is a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    /// `control.if`: children form the conditional branch body.
    Conditional,
    /// `control.loop`: children run once per item.
    ForEach,
    /// `control.while`: children run while the condition holds.
    While,
    /// `control.try_catch`: children form the guarded scope.
    TryCatch,
    /// `control.parallel`: children run as concurrent branches.
    Parallel,
}

impl ContainerKind {
    pub const ALL: [ContainerKind; 5] = [
        ContainerKind::Conditional,
        ContainerKind::ForEach,
        ContainerKind::While,
        ContainerKind::TryCatch,
        ContainerKind::Parallel,
    ];

    pub fn from_node_type(node_type: &str) -> Option<Self> {
        match node_type {
            "control.if" => Some(ContainerKind::Conditional),
            "control.loop" => Some(ContainerKind::ForEach),
            "control.while" => Some(ContainerKind::While),
            "control.try_catch" => Some(ContainerKind::TryCatch),
            "control.parallel" => Some(ContainerKind::Parallel),
            _ => None,
        }
    }

    pub fn node_type(&self) -> &'static str {
        match self {
            ContainerKind::Conditional => "control.if",
            ContainerKind::ForEach => "control.loop",
            ContainerKind::While => "control.while",
            ContainerKind::TryCatch => "control.try_catch",
            ContainerKind::Parallel => "control.parallel",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.node_type())
    }
}

/// Returns `true` if nodes of `node_type` may own child nodes.
pub fn is_container(node_type: &str) -> bool {
    ContainerKind::from_node_type(node_type).is_some()
}
