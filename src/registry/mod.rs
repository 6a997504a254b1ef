use crate::error::RegistryError;
use ahash::AHashMap;
use std::sync::OnceLock;
use tracing::warn;

mod catalog;
pub mod container;
pub mod template;

pub use container::{ContainerKind, is_container};
pub use template::*;

/// An immutable catalog mapping node types to their templates.
///
/// Built once through [`RegistryBuilder`] (or [`NodeTemplateRegistry::builtin`]) and never
/// mutated afterwards. Iteration follows registration order.
#[derive(Debug, Clone)]
pub struct NodeTemplateRegistry {
    templates: AHashMap<String, NodeTemplate>,
    order: Vec<String>,
}

impl NodeTemplateRegistry {
    /// The process-wide catalog of built-in node types.
    pub fn builtin() -> &'static NodeTemplateRegistry {
        static BUILTIN: OnceLock<NodeTemplateRegistry> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            let mut registry = NodeTemplateRegistry {
                templates: AHashMap::new(),
                order: Vec::new(),
            };
            for template in catalog::builtin_templates() {
                if registry.templates.contains_key(&template.node_type) {
                    warn!(node_type = %template.node_type, "duplicate built-in template skipped");
                    continue;
                }
                registry.order.push(template.node_type.clone());
                registry
                    .templates
                    .insert(template.node_type.clone(), template);
            }
            registry
        })
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Looks up the template for `node_type`.
    pub fn lookup(&self, node_type: &str) -> Result<&NodeTemplate, RegistryError> {
        self.templates
            .get(node_type)
            .ok_or_else(|| RegistryError::UnknownNodeType(node_type.to_string()))
    }

    pub fn get(&self, node_type: &str) -> Option<&NodeTemplate> {
        self.templates.get(node_type)
    }

    pub fn contains(&self, node_type: &str) -> bool {
        self.templates.contains_key(node_type)
    }

    /// All templates in `category`, in registration order.
    pub fn by_category(&self, category: NodeCategory) -> Vec<&NodeTemplate> {
        self.iter().filter(|t| t.category == category).collect()
    }

    /// The categories that have at least one template.
    pub fn categories(&self) -> Vec<NodeCategory> {
        NodeCategory::ALL
            .iter()
            .copied()
            .filter(|c| self.templates.values().any(|t| t.category == *c))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeTemplate> {
        self.order.iter().filter_map(|t| self.templates.get(t))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Assembles a custom, immutable registry.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    templates: Vec<NodeTemplate>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a copy of the built-in catalog.
    pub fn with_builtin(mut self) -> Self {
        self.templates
            .extend(NodeTemplateRegistry::builtin().iter().cloned());
        self
    }

    pub fn with_template(mut self, template: NodeTemplate) -> Self {
        self.templates.push(template);
        self
    }

    pub fn with_templates(mut self, templates: impl IntoIterator<Item = NodeTemplate>) -> Self {
        self.templates.extend(templates);
        self
    }

    pub fn build(self) -> Result<NodeTemplateRegistry, RegistryError> {
        let mut templates = AHashMap::with_capacity(self.templates.len());
        let mut order = Vec::with_capacity(self.templates.len());
        for template in self.templates {
            if templates.contains_key(&template.node_type) {
                return Err(RegistryError::DuplicateNodeType(template.node_type));
            }
            order.push(template.node_type.clone());
            templates.insert(template.node_type.clone(), template);
        }
        Ok(NodeTemplateRegistry { templates, order })
    }
}
