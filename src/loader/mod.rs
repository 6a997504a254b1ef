use crate::compiler::DEFAULT_MAX_DEPTH;
use crate::dsl::{BotDsl, DslNode, check_document};
use crate::error::LoadError;
use crate::graph::{GraphModel, GraphNode, Handle};
use crate::registry::NodeTemplateRegistry;
use tracing::{debug, info, warn};

/// Turns a `BotDsl` document back into an editable `GraphModel`.
pub struct Loader<'a> {
    registry: &'a NodeTemplateRegistry,
    max_depth: usize,
}

impl Default for Loader<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader<'static> {
    pub fn new() -> Self {
        Self {
            registry: NodeTemplateRegistry::builtin(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl<'a> Loader<'a> {
    pub fn with_registry(registry: &'a NodeTemplateRegistry) -> Self {
        Self {
            registry,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parses a JSON document and loads it.
    pub fn load_str(&self, json: &str) -> Result<GraphModel, Vec<LoadError>> {
        let dsl = BotDsl::from_json(json).map_err(|e| vec![LoadError::Json(e.to_string())])?;
        self.load(&dsl)
    }

    /// Flattens the document into a graph.
    ///
    /// The document is checked first and every problem is reported together; an invalid
    /// document is rejected as a whole, never partially loaded. Nested nodes get their
    /// enclosing container as `parent_id`, and each non-`END` output becomes an edge with
    /// the id `GraphModel::connect` assigns.
    pub fn load(&self, dsl: &BotDsl) -> Result<GraphModel, Vec<LoadError>> {
        let report = check_document(dsl, self.registry, self.max_depth);
        if !report.is_ok() {
            warn!(bot_id = %dsl.bot.id, errors = report.errors.len(), "document rejected");
            return Err(report.errors);
        }
        for warning in &report.warnings {
            debug!(bot_id = %dsl.bot.id, %warning, "document warning");
        }

        let mut nodes = Vec::new();
        let mut links = Vec::new();
        let mut errors = Vec::new();
        for node in &dsl.nodes {
            self.flatten(node, None, &mut nodes, &mut links, &mut errors);
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let mut graph =
            GraphModel::from_parts(nodes, Vec::new()).map_err(|e| vec![LoadError::from(e)])?;
        for (source, handle, target) in links {
            graph
                .connect(source, target, handle)
                .map_err(|e| vec![LoadError::from(e)])?;
        }
        info!(
            bot_id = %dsl.bot.id,
            nodes = graph.nodes().len(),
            edges = graph.edges().len(),
            "document loaded"
        );
        Ok(graph)
    }

    /// Pre-order walk: a container is emitted before its children, children in document
    /// order. Depth was bounded by the document check.
    fn flatten<'d>(
        &self,
        node: &'d DslNode,
        parent_id: Option<&str>,
        nodes: &mut Vec<GraphNode>,
        links: &mut Vec<(&'d str, Handle, &'d str)>,
        errors: &mut Vec<LoadError>,
    ) {
        let template = match self.registry.lookup(&node.node_type) {
            Ok(template) => template,
            Err(_) => {
                errors.push(LoadError::UnknownNodeType {
                    node_id: node.id.clone(),
                    type_name: node.node_type.clone(),
                });
                return;
            }
        };

        nodes.push(GraphNode {
            id: node.id.clone(),
            node_type: node.node_type.clone(),
            label: node.label.clone(),
            config: node.config.clone(),
            category: template.category,
            position: node.position,
            parent_id: parent_id.map(str::to_string),
            description: node.description.clone(),
        });
        for handle in Handle::ALL {
            if let Some(target) = node.outputs.get(handle).node_id() {
                links.push((node.id.as_str(), handle, target));
            }
        }

        for child in &node.children {
            self.flatten(child, Some(&node.id), nodes, links, errors);
        }
    }
}

/// Loads `dsl` with the built-in registry.
pub fn load(dsl: &BotDsl) -> Result<GraphModel, Vec<LoadError>> {
    Loader::new().load(dsl)
}
