use crate::error::ResolveError;
use crate::graph::{GraphModel, GraphNode};
use crate::registry::{NodeTemplateRegistry, OutputType};
use ahash::AHashSet;
use serde::Serialize;
use serde_json::Value;
use std::collections::VecDeque;
use tracing::debug;

mod reference;

pub use reference::{ExpressionRef, UnresolvedReference, extract_references};

/// The node type whose user-defined form fields become `${Label.formData.<id>}` variables.
pub const FORM_TRIGGER_TYPE: &str = "trigger.form";

/// An upstream output that a node may reference in its configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableVariable {
    pub node_id: String,
    pub node_label: String,
    /// Path below the label, e.g. `status` or `formData.email`.
    pub field: String,
    pub field_type: OutputType,
    pub description: String,
    /// The rendered interpolation string, e.g. `${Call.status}`.
    pub expression: String,
}

/// Renders `${label.path}`.
pub fn render_expression(label: &str, path: &str) -> String {
    format!("${{{}.{}}}", label, path)
}

/// Computes which outputs are visible to a node by walking the edge graph backwards.
pub struct ExpressionResolver<'a> {
    registry: &'a NodeTemplateRegistry,
}

impl Default for ExpressionResolver<'static> {
    fn default() -> Self {
        Self::new(NodeTemplateRegistry::builtin())
    }
}

impl<'a> ExpressionResolver<'a> {
    pub fn new(registry: &'a NodeTemplateRegistry) -> Self {
        Self { registry }
    }

    /// Lists the variables visible to `target_id`.
    ///
    /// Predecessors are discovered breadth-first over reversed success/error edges and
    /// each is visited once, so cycles (loop back-edges) terminate. The target itself is
    /// never listed. Entries are grouped by predecessor in discovery order, then by the
    /// order of the template's output schema.
    ///
    /// Nesting does not count as an edge: a container's outputs (`${Each.item}`) are visible
    /// to the container's edge successors, not to its children.
    pub fn available_variables(
        &self,
        graph: &GraphModel,
        target_id: &str,
    ) -> Result<Vec<AvailableVariable>, ResolveError> {
        if !graph.contains_node(target_id) {
            return Err(ResolveError::NodeNotFound(target_id.to_string()));
        }

        let mut visited: AHashSet<&str> = AHashSet::new();
        visited.insert(target_id);
        let mut queue: VecDeque<&str> = VecDeque::from([target_id]);
        let mut predecessors: Vec<&GraphNode> = Vec::new();

        while let Some(current) = queue.pop_front() {
            for edge in graph.incoming(current) {
                if !visited.insert(edge.source.as_str()) {
                    continue;
                }
                if let Some(source) = graph.node(&edge.source) {
                    predecessors.push(source);
                    queue.push_back(edge.source.as_str());
                }
            }
        }

        let mut variables = Vec::new();
        for node in predecessors {
            variables.extend(self.variables_of(node));
        }
        Ok(variables)
    }

    /// The variables a single node exposes to its successors.
    pub fn variables_of(&self, node: &GraphNode) -> Vec<AvailableVariable> {
        let Some(template) = self.registry.get(&node.node_type) else {
            debug!(node_id = %node.id, node_type = %node.node_type, "no template; no outputs");
            return Vec::new();
        };

        let mut variables: Vec<AvailableVariable> = template
            .outputs_or_empty()
            .iter()
            .map(|output| AvailableVariable {
                node_id: node.id.clone(),
                node_label: node.label.clone(),
                field: output.name.clone(),
                field_type: output.output_type,
                description: output.description.clone(),
                expression: render_expression(&node.label, &output.name),
            })
            .collect();

        if node.node_type == FORM_TRIGGER_TYPE {
            variables.extend(form_field_variables(node));
        }
        variables
    }
}

/// One variable per user-defined form field, keyed by the field's `id` (or `name`).
fn form_field_variables(node: &GraphNode) -> Vec<AvailableVariable> {
    let Some(fields) = node.config.get("fields").and_then(Value::as_array) else {
        return Vec::new();
    };

    fields
        .iter()
        .filter_map(|field| {
            let id = field
                .get("id")
                .or_else(|| field.get("name"))
                .and_then(Value::as_str)?;
            let label = field.get("label").and_then(Value::as_str).unwrap_or(id);
            let field_type = match field.get("type").and_then(Value::as_str) {
                Some("number") => OutputType::Number,
                Some("checkbox") | Some("boolean") => OutputType::Boolean,
                Some("multiselect") | Some("file") => OutputType::Array,
                _ => OutputType::String,
            };
            let path = format!("formData.{}", id);
            Some(AvailableVariable {
                node_id: node.id.clone(),
                node_label: node.label.clone(),
                expression: render_expression(&node.label, &path),
                field: path,
                field_type,
                description: label.to_string(),
            })
        })
        .collect()
}
