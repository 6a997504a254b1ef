use crate::dsl::{DslNode, NodeOutputs, Target};
use crate::error::CompileError;
use crate::graph::{GraphModel, GraphNode, Handle};
use crate::registry::is_container;
use ahash::AHashMap;

/// Lowers graph nodes into nested `DslNode`s.
///
/// Edge and child lookups are indexed once up front; children keep creation order.
pub(super) struct DslBuilder<'a> {
    children: AHashMap<&'a str, Vec<&'a GraphNode>>,
    outputs: AHashMap<(&'a str, Handle), &'a str>,
    max_depth: usize,
}

impl<'a> DslBuilder<'a> {
    pub(super) fn new(graph: &'a GraphModel, max_depth: usize) -> Self {
        let mut children: AHashMap<&'a str, Vec<&'a GraphNode>> = AHashMap::new();
        for node in graph.nodes() {
            if let Some(parent) = &node.parent_id {
                children.entry(parent.as_str()).or_default().push(node);
            }
        }

        let outputs = graph
            .edges()
            .iter()
            .map(|e| ((e.source.as_str(), e.source_handle), e.target.as_str()))
            .collect();

        Self {
            children,
            outputs,
            max_depth,
        }
    }

    /// Builds the `DslNode` for `node`, recursing into a container's children.
    pub(super) fn build_node(&self, node: &GraphNode) -> Result<DslNode, CompileError> {
        self.build_at_depth(node, 0)
    }

    fn build_at_depth(&self, node: &GraphNode, depth: usize) -> Result<DslNode, CompileError> {
        if depth > self.max_depth {
            return Err(CompileError::NestingTooDeep {
                node_id: node.id.clone(),
                max_depth: self.max_depth,
            });
        }

        let mut outputs = NodeOutputs::default();
        for handle in Handle::ALL {
            if let Some(target) = self.outputs.get(&(node.id.as_str(), handle)) {
                outputs.set(handle, Target::Node(target.to_string()));
            }
        }

        let mut children = Vec::new();
        if let Some(nested) = self.children.get(node.id.as_str()) {
            if !is_container(&node.node_type) {
                return Err(CompileError::InvalidContainment {
                    node_id: node.id.clone(),
                    message: format!("type '{}' cannot have children", node.node_type),
                });
            }
            for child in nested {
                children.push(self.build_at_depth(child, depth + 1)?);
            }
        }

        Ok(DslNode {
            id: node.id.clone(),
            node_type: node.node_type.clone(),
            config: node.config.clone(),
            label: node.label.clone(),
            position: node.position,
            description: node.description.clone(),
            outputs,
            children,
        })
    }
}
