use crate::dsl::ai::{AiNode, check_ai_nodes};
use crate::dsl::{BotDsl, BotMetadata, DSL_VERSION, VariableDefinition};
use crate::error::CompileError;
use crate::graph::GraphModel;
use crate::registry::{NodeCategory, NodeTemplateRegistry};
use crate::validation::ConfigValidator;
use std::collections::BTreeMap;
use tracing::{debug, info, info_span, warn};

mod builder;

use builder::DslBuilder;

/// How deep containers may nest before compilation gives up.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Compiles a `GraphModel` into a `BotDsl` document.
///
/// The compiler borrows the graph: the editing session keeps ownership and the emitted
/// document is an independent snapshot.
pub struct Compiler<'a> {
    graph: &'a GraphModel,
    metadata: BotMetadata,
    registry: &'a NodeTemplateRegistry,
    variables: BTreeMap<String, VariableDefinition>,
    max_depth: usize,
}

pub struct CompilerBuilder<'a> {
    graph: &'a GraphModel,
    metadata: BotMetadata,
    registry: &'a NodeTemplateRegistry,
    variables: BTreeMap<String, VariableDefinition>,
    max_depth: usize,
}

impl<'a> CompilerBuilder<'a> {
    pub fn new(graph: &'a GraphModel, metadata: BotMetadata) -> Self {
        Self {
            graph,
            metadata,
            registry: NodeTemplateRegistry::builtin(),
            variables: BTreeMap::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Validates against a custom registry instead of the built-in catalog.
    pub fn with_registry(mut self, registry: &'a NodeTemplateRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_variable(mut self, name: &str, definition: VariableDefinition) -> Self {
        self.variables.insert(name.to_string(), definition);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn build(self) -> Compiler<'a> {
        Compiler {
            graph: self.graph,
            metadata: self.metadata,
            registry: self.registry,
            variables: self.variables,
            max_depth: self.max_depth,
        }
    }
}

impl<'a> Compiler<'a> {
    pub fn builder(graph: &'a GraphModel, metadata: BotMetadata) -> CompilerBuilder<'a> {
        CompilerBuilder::new(graph, metadata)
    }

    /// Compiles the graph.
    ///
    /// Every structural and configuration problem in the graph is collected before
    /// returning, so a failed compile reports all of them at once. Nothing is emitted
    /// unless the whole graph is valid.
    pub fn compile(self) -> Result<BotDsl, Vec<CompileError>> {
        let span = info_span!("compile", bot_id = %self.metadata.id);
        let _enter = span.enter();

        let mut errors: Vec<CompileError> = self
            .graph
            .check_structure()
            .into_iter()
            .map(CompileError::from)
            .collect();
        errors.extend(self.validate_configs());
        errors.extend(self.check_agents());
        if !errors.is_empty() {
            warn!(errors = errors.len(), "compilation rejected");
            return Err(errors);
        }

        let builder = DslBuilder::new(self.graph, self.max_depth);
        let mut nodes = Vec::new();
        for node in self.graph.top_level() {
            match builder.build_node(node) {
                Ok(dsl_node) => nodes.push(dsl_node),
                Err(e) => errors.push(e),
            }
        }
        if !errors.is_empty() {
            warn!(errors = errors.len(), "compilation rejected");
            return Err(errors);
        }

        // Categories come from the registry, never from the stored copy on the node.
        let triggers: Vec<String> = self
            .graph
            .top_level()
            .filter(|n| {
                self.registry
                    .get(&n.node_type)
                    .is_some_and(|t| t.category == NodeCategory::Trigger)
            })
            .map(|n| n.id.clone())
            .collect();
        let start_node = triggers
            .first()
            .cloned()
            .or_else(|| self.graph.top_level().next().map(|n| n.id.clone()));
        if start_node.is_none() {
            debug!("graph is empty; emitting a document without start_node");
        }

        info!(
            nodes = self.graph.nodes().len(),
            top_level = nodes.len(),
            triggers = triggers.len(),
            "compilation succeeded"
        );

        Ok(BotDsl {
            version: DSL_VERSION.to_string(),
            bot: self.metadata,
            nodes,
            triggers,
            start_node,
            variables: self.variables,
        })
    }

    /// Runs the config validator over every node, in creation order. A stored category
    /// that disagrees with the template is reported alongside.
    fn validate_configs(&self) -> Vec<CompileError> {
        let mut errors = Vec::new();
        for node in self.graph.nodes() {
            let Some(template) = self.registry.get(&node.node_type) else {
                errors.push(CompileError::UnknownNodeType {
                    node_id: node.id.clone(),
                    type_name: node.node_type.clone(),
                });
                continue;
            };
            if node.category != template.category {
                errors.push(CompileError::CategoryMismatch {
                    node_id: node.id.clone(),
                    node_type: node.node_type.clone(),
                    expected: template.category,
                    actual: node.category,
                });
            }
            errors.extend(
                ConfigValidator::validate(node, template)
                    .into_issues()
                    .into_iter()
                    .map(|issue| CompileError::InvalidConfig {
                        node_id: node.id.clone(),
                        issue,
                    }),
            );
        }
        errors
    }

    /// Agent model references are errors; provider setting gaps are logged.
    fn check_agents(&self) -> Vec<CompileError> {
        let nodes: Vec<AiNode<'_>> = self
            .graph
            .nodes()
            .iter()
            .map(|n| AiNode {
                id: &n.id,
                node_type: &n.node_type,
                config: &n.config,
            })
            .collect();
        let findings = check_ai_nodes(&nodes);
        for warning in &findings.warnings {
            warn!(%warning, "AI configuration incomplete");
        }
        findings
            .errors
            .into_iter()
            .map(|issue| CompileError::InvalidAgentModel {
                node_id: issue.node_id,
                message: issue.message,
            })
            .collect()
    }
}

/// Compiles `graph` with the built-in registry and default settings.
pub fn compile(graph: &GraphModel, metadata: BotMetadata) -> Result<BotDsl, Vec<CompileError>> {
    Compiler::builder(graph, metadata).build().compile()
}
