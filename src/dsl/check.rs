use super::ai::{AiNode, check_ai_nodes, is_config_node};
use super::{BotDsl, DSL_VERSION, DslNode};
use crate::error::LoadError;
use crate::graph::Handle;
use crate::registry::{NodeTemplateRegistry, is_container};
use ahash::{AHashMap, AHashSet};
use std::collections::VecDeque;
use thiserror::Error;

/// Non-fatal findings about a document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentWarning {
    #[error("Node '{0}' is not reachable from the start node or any trigger")]
    UnreachableNode(String),

    #[error("Document version '{0}' differs from the supported version {DSL_VERSION}")]
    UnsupportedVersion(String),

    #[error("AI model '{0}' names no model; the provider's default model will be used")]
    DefaultModel(String),

    #[error("Node '{node_id}': provider '{provider}' needs '{setting}' to be configured")]
    MissingProviderSetting {
        node_id: String,
        provider: String,
        setting: String,
    },

    #[error("AI agent '{0}' retrieves from memory but has no embeddings node")]
    MemoryWithoutEmbeddings(String),
}

/// Everything `check_document` found. A document is loadable iff `errors` is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub errors: Vec<LoadError>,
    pub warnings: Vec<DocumentWarning>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Structurally checks a DSL document without building a graph.
///
/// Errors: blank or duplicate ids, outputs pointing at ids absent from the document,
/// children on a non-container type, unknown node types, unknown `start_node`/trigger ids,
/// nesting deeper than `max_depth`, and AI agents whose model reference is missing or
/// broken. Warnings: unreachable nodes, a foreign schema version and incomplete AI provider
/// settings. Reachability is only computed for documents without errors.
pub fn check_document(
    dsl: &BotDsl,
    registry: &NodeTemplateRegistry,
    max_depth: usize,
) -> CheckReport {
    let mut report = CheckReport::default();

    if dsl.version != DSL_VERSION {
        report
            .warnings
            .push(DocumentWarning::UnsupportedVersion(dsl.version.clone()));
    }

    // Depth-bounded walk; nodes below the bound are reported and not descended into.
    let mut visited: Vec<&DslNode> = Vec::new();
    let mut stack: Vec<(&DslNode, usize)> = dsl.nodes.iter().rev().map(|n| (n, 0)).collect();
    while let Some((node, depth)) = stack.pop() {
        if depth > max_depth {
            report.errors.push(LoadError::NestingTooDeep {
                node_id: node.id.clone(),
                max_depth,
            });
            continue;
        }
        visited.push(node);
        if node.id.trim().is_empty() {
            report.errors.push(LoadError::BlankNodeId(node.id.clone()));
        }
        if !node.children.is_empty() && !is_container(&node.node_type) {
            report.errors.push(LoadError::InvalidContainment {
                node_id: node.id.clone(),
                message: format!(
                    "type '{}' is not a container but has {} children",
                    node.node_type,
                    node.children.len()
                ),
            });
        }
        if !registry.contains(&node.node_type) {
            report.errors.push(LoadError::UnknownNodeType {
                node_id: node.id.clone(),
                type_name: node.node_type.clone(),
            });
        }
        stack.extend(node.children.iter().rev().map(|c| (c, depth + 1)));
    }

    let mut ids: AHashSet<&str> = AHashSet::with_capacity(visited.len());
    for node in &visited {
        if !ids.insert(node.id.as_str()) {
            report
                .errors
                .push(LoadError::DuplicateNodeId(node.id.clone()));
        }
    }

    for node in &visited {
        for handle in Handle::ALL {
            if let Some(target) = node.outputs.get(handle).node_id() {
                if !ids.contains(target) {
                    report.errors.push(LoadError::DanglingEdgeReference {
                        node_id: node.id.clone(),
                        handle,
                        missing_node_id: target.to_string(),
                    });
                }
            }
        }
    }

    if let Some(start) = &dsl.start_node {
        if !ids.contains(start.as_str()) {
            report
                .errors
                .push(LoadError::UnknownStartNode(start.clone()));
        }
    }
    for trigger in &dsl.triggers {
        if !ids.contains(trigger.as_str()) {
            report
                .errors
                .push(LoadError::UnknownTrigger(trigger.clone()));
        }
    }

    let ai_nodes: Vec<AiNode<'_>> = visited
        .iter()
        .map(|n| AiNode {
            id: &n.id,
            node_type: &n.node_type,
            config: &n.config,
        })
        .collect();
    let findings = check_ai_nodes(&ai_nodes);
    report
        .errors
        .extend(findings.errors.into_iter().map(|issue| LoadError::InvalidAgentModel {
            node_id: issue.node_id,
            message: issue.message,
        }));
    report.warnings.extend(findings.warnings);

    if report.errors.is_empty() {
        report.warnings.extend(
            unreachable_nodes(dsl, &visited)
                .into_iter()
                .map(DocumentWarning::UnreachableNode),
        );
    }
    report
}

/// Ids not reachable from the entry points. Entering a container reaches its whole body.
/// AI model and embeddings nodes are configuration and never reported.
fn unreachable_nodes(dsl: &BotDsl, all: &[&DslNode]) -> Vec<String> {
    let by_id: AHashMap<&str, &DslNode> = all.iter().map(|n| (n.id.as_str(), *n)).collect();

    let mut entries: Vec<&str> = dsl.triggers.iter().map(String::as_str).collect();
    if let Some(start) = &dsl.start_node {
        entries.push(start);
    } else if let Some(first) = dsl.nodes.first() {
        entries.push(&first.id);
    }

    let mut reached: AHashSet<&str> = AHashSet::new();
    let mut queue: VecDeque<&str> = entries.into_iter().collect();
    while let Some(id) = queue.pop_front() {
        if !reached.insert(id) {
            continue;
        }
        let Some(node) = by_id.get(id) else { continue };
        for handle in Handle::ALL {
            if let Some(next) = node.outputs.get(handle).node_id() {
                queue.push_back(next);
            }
        }
        queue.extend(node.children.iter().map(|c| c.id.as_str()));
    }

    all.iter()
        .filter(|n| !reached.contains(n.id.as_str()) && !is_config_node(&n.node_type))
        .map(|n| n.id.clone())
        .collect()
}
