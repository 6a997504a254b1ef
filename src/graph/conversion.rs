use super::GraphModel;
use crate::error::ConversionError;
use crate::registry::NodeTemplateRegistry;

/// A trait for editor-side data models that can be converted into a `GraphModel`.
///
/// This is the extension point for plugging a different canvas format into the compiler.
/// The registry is provided so implementations can fill in each node's category.
///
/// # Example
///
/// ```rust,no_run
/// use botflow::error::ConversionError;
/// use botflow::graph::{GraphModel, GraphNode, Handle, IntoGraph};
/// use botflow::registry::NodeTemplateRegistry;
///
/// struct MyStep { id: String, kind: String, next: Option<String> }
/// struct MyBot { steps: Vec<MyStep> }
///
/// impl IntoGraph for MyBot {
///     fn into_graph(
///         self,
///         registry: &NodeTemplateRegistry,
///     ) -> Result<GraphModel, ConversionError> {
///         let mut graph = GraphModel::new();
///         for step in &self.steps {
///             let template = registry.lookup(&step.kind).map_err(|_| {
///                 ConversionError::UnknownNodeType {
///                     node_id: step.id.clone(),
///                     type_name: step.kind.clone(),
///                 }
///             })?;
///             graph.add_node(GraphNode::from_template(&step.id, template, &step.id))?;
///         }
///         for step in &self.steps {
///             if let Some(next) = &step.next {
///                 graph.connect(&step.id, next, Handle::Success)?;
///             }
///         }
///         Ok(graph)
///     }
/// }
/// ```
pub trait IntoGraph {
    /// Consumes the object and converts it into an editable bot graph.
    fn into_graph(self, registry: &NodeTemplateRegistry) -> Result<GraphModel, ConversionError>;
}
