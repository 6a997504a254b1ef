use crate::graph::Handle;
use crate::registry::NodeCategory;
use thiserror::Error;

/// Errors raised by the node template registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Node type '{0}' is not registered")]
    UnknownNodeType(String),

    #[error("Node type '{0}' is registered more than once")]
    DuplicateNodeType(String),
}

/// A single field-level problem found while validating a node's configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldIssue {
    #[error("Required field '{field}' is missing or empty")]
    MissingRequiredField { field: String },

    #[error("Field '{field}' expected {expected}, but found {actual}")]
    InvalidFieldType {
        field: String,
        expected: String,
        actual: String,
    },
}

impl FieldIssue {
    /// The config key this issue refers to.
    pub fn field(&self) -> &str {
        match self {
            FieldIssue::MissingRequiredField { field } => field,
            FieldIssue::InvalidFieldType { field, .. } => field,
        }
    }
}

/// Errors reported by `GraphModel` mutators. These fail fast: the graph is left unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node id {0:?} is blank")]
    BlankNodeId(String),

    #[error("A node with id '{0}' already exists")]
    DuplicateNodeId(String),

    #[error("An edge with id '{0}' already exists")]
    DuplicateEdgeId(String),

    #[error("Node '{0}' not found")]
    NodeNotFound(String),

    #[error("Edge '{0}' not found")]
    EdgeNotFound(String),

    #[error("Edge '{edge_id}' references node '{missing_node_id}', which does not exist")]
    DanglingEdgeReference {
        edge_id: String,
        missing_node_id: String,
    },

    #[error("Node '{source_node_id}' already has an outgoing '{handle}' edge")]
    DuplicateOutgoingEdge {
        source_node_id: String,
        handle: Handle,
    },

    #[error("Invalid containment for node '{node_id}': {message}")]
    InvalidContainment { node_id: String, message: String },
}

/// Errors that prevent a graph from being compiled into a DSL document.
///
/// The compiler accumulates these across the whole graph and returns them together.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("Node '{node_id}' has an unregistered node type: '{type_name}'")]
    UnknownNodeType { node_id: String, type_name: String },

    #[error("Node '{node_id}' has an invalid configuration: {issue}")]
    InvalidConfig { node_id: String, issue: FieldIssue },

    #[error("Edge '{edge_id}' references node '{missing_node_id}', which does not exist")]
    DanglingEdgeReference {
        edge_id: String,
        missing_node_id: String,
    },

    #[error("Invalid containment for node '{node_id}': {message}")]
    InvalidContainment { node_id: String, message: String },

    #[error("Node id '{0}' is used more than once")]
    DuplicateNodeId(String),

    #[error("Node '{source_node_id}' has more than one outgoing '{handle}' edge")]
    DuplicateOutgoingEdge {
        source_node_id: String,
        handle: Handle,
    },

    #[error("Edge id '{0}' is used more than once")]
    DuplicateEdgeId(String),

    #[error("Node '{node_id}' is nested deeper than the maximum of {max_depth} levels")]
    NestingTooDeep { node_id: String, max_depth: usize },

    #[error("Node id {0:?} is blank")]
    BlankNodeId(String),

    #[error(
        "Node '{node_id}' of type '{node_type}' is stored as category '{actual}', \
         but the registry says '{expected}'"
    )]
    CategoryMismatch {
        node_id: String,
        node_type: String,
        expected: NodeCategory,
        actual: NodeCategory,
    },

    #[error("AI agent '{node_id}': {message}")]
    InvalidAgentModel { node_id: String, message: String },

    #[error(transparent)]
    Structure(GraphError),
}

impl CompileError {
    /// The node this error is attributed to, when there is one.
    pub fn node_id(&self) -> Option<&str> {
        match self {
            CompileError::UnknownNodeType { node_id, .. }
            | CompileError::InvalidConfig { node_id, .. }
            | CompileError::InvalidContainment { node_id, .. }
            | CompileError::NestingTooDeep { node_id, .. }
            | CompileError::CategoryMismatch { node_id, .. }
            | CompileError::InvalidAgentModel { node_id, .. } => Some(node_id),
            CompileError::DuplicateNodeId(node_id) | CompileError::BlankNodeId(node_id) => {
                Some(node_id)
            }
            CompileError::DuplicateOutgoingEdge { source_node_id, .. } => Some(source_node_id),
            CompileError::DanglingEdgeReference { .. }
            | CompileError::DuplicateEdgeId(_)
            | CompileError::Structure(_) => None,
        }
    }
}

impl From<GraphError> for CompileError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::BlankNodeId(id) => CompileError::BlankNodeId(id),
            GraphError::DuplicateNodeId(id) => CompileError::DuplicateNodeId(id),
            GraphError::DanglingEdgeReference {
                edge_id,
                missing_node_id,
            } => CompileError::DanglingEdgeReference {
                edge_id,
                missing_node_id,
            },
            GraphError::DuplicateOutgoingEdge {
                source_node_id,
                handle,
            } => CompileError::DuplicateOutgoingEdge {
                source_node_id,
                handle,
            },
            GraphError::InvalidContainment { node_id, message } => {
                CompileError::InvalidContainment { node_id, message }
            }
            GraphError::DuplicateEdgeId(edge_id) => CompileError::DuplicateEdgeId(edge_id),
            other @ (GraphError::NodeNotFound(_) | GraphError::EdgeNotFound(_)) => {
                CompileError::Structure(other)
            }
        }
    }
}

/// Errors that prevent a DSL document from being loaded back into a graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Failed to parse DSL JSON: {0}")]
    Json(String),

    #[error("Node id {0:?} is blank")]
    BlankNodeId(String),

    #[error("Node id '{0}' is used more than once in the document")]
    DuplicateNodeId(String),

    #[error(
        "Output '{handle}' of node '{node_id}' references node '{missing_node_id}', \
         which is not in the document"
    )]
    DanglingEdgeReference {
        node_id: String,
        handle: Handle,
        missing_node_id: String,
    },

    #[error("Invalid containment for node '{node_id}': {message}")]
    InvalidContainment { node_id: String, message: String },

    #[error("Node '{node_id}' has an unregistered node type: '{type_name}'")]
    UnknownNodeType { node_id: String, type_name: String },

    #[error("start_node '{0}' does not exist in the document")]
    UnknownStartNode(String),

    #[error("Trigger '{0}' does not exist in the document")]
    UnknownTrigger(String),

    #[error("Node '{node_id}' is nested deeper than the maximum of {max_depth} levels")]
    NestingTooDeep { node_id: String, max_depth: usize },

    #[error("AI agent '{node_id}': {message}")]
    InvalidAgentModel { node_id: String, message: String },

    #[error("Failed to rebuild graph: {0}")]
    Graph(#[from] GraphError),
}

/// Errors raised while resolving expressions against a graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Node '{0}' not found")]
    NodeNotFound(String),
}

/// Errors that can occur when converting a custom editor format into a `GraphModel`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Invalid editor data: {0}")]
    ValidationError(String),

    #[error("Node '{node_id}' has an unregistered node type: '{type_name}'")]
    UnknownNodeType { node_id: String, type_name: String },

    #[error(
        "Node '{node_id}' of type '{node_type}' claims category '{actual}', \
         but the registry says '{expected}'"
    )]
    CategoryMismatch {
        node_id: String,
        node_type: String,
        expected: NodeCategory,
        actual: NodeCategory,
    },

    #[error(transparent)]
    Graph(#[from] GraphError),
}
