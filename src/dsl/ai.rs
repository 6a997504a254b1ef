//! Cross-node checks for AI agents.
//!
//! An `ai.agent` names the `ai.model` node it talks to, and optionally an `ai.embeddings`
//! node for memory retrieval, by id in its config. Model and embeddings nodes only carry
//! settings and take no part in the success/error flow.

use super::DocumentWarning;
use ahash::AHashMap;
use serde_json::{Map, Value};

pub const AGENT_TYPE: &str = "ai.agent";
pub const MODEL_TYPE: &str = "ai.model";
pub const EMBEDDINGS_TYPE: &str = "ai.embeddings";

/// Node types that configure other nodes instead of running in the flow.
pub const CONFIG_NODE_TYPES: [&str; 2] = [MODEL_TYPE, EMBEDDINGS_TYPE];

const API_KEY_PROVIDERS: [&str; 5] = ["openai", "anthropic", "groq", "mistral", "cohere"];
const DEFAULT_PROVIDER: &str = "openai";

pub fn is_config_node(node_type: &str) -> bool {
    CONFIG_NODE_TYPES.contains(&node_type)
}

/// The parts of a node the checks look at, borrowed from a graph node or a document node.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AiNode<'a> {
    pub id: &'a str,
    pub node_type: &'a str,
    pub config: &'a Map<String, Value>,
}

/// A broken agent reference. Blocks compiling and loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AgentIssue {
    pub node_id: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub(crate) struct AiFindings {
    pub errors: Vec<AgentIssue>,
    pub warnings: Vec<DocumentWarning>,
}

/// Checks every AI node in `nodes`, in order.
pub(crate) fn check_ai_nodes(nodes: &[AiNode<'_>]) -> AiFindings {
    let mut findings = AiFindings::default();
    if !nodes.iter().any(|n| n.node_type.starts_with("ai.")) {
        return findings;
    }

    let types: AHashMap<&str, &str> = nodes.iter().map(|n| (n.id, n.node_type)).collect();
    for node in nodes {
        match node.node_type {
            AGENT_TYPE => check_agent(node, &types, &mut findings),
            MODEL_TYPE => check_model(node, &mut findings),
            EMBEDDINGS_TYPE => check_embeddings(node, &mut findings),
            _ => {}
        }
    }
    findings
}

fn check_agent(node: &AiNode<'_>, types: &AHashMap<&str, &str>, findings: &mut AiFindings) {
    match text(node.config, "model") {
        None => findings.errors.push(AgentIssue {
            node_id: node.id.to_string(),
            message: "no AI model is connected; set 'model' to the id of an ai.model node"
                .to_string(),
        }),
        Some(model) => {
            if let Some(message) = reference_problem(types, "model", model, MODEL_TYPE) {
                findings.errors.push(AgentIssue {
                    node_id: node.id.to_string(),
                    message,
                });
            }
        }
    }

    let memory = text(node.config, "memory").unwrap_or("none");
    match text(node.config, "embeddings") {
        None if matches!(memory, "retrieve" | "both") => findings
            .warnings
            .push(DocumentWarning::MemoryWithoutEmbeddings(node.id.to_string())),
        None => {}
        Some(embeddings) => {
            if let Some(message) =
                reference_problem(types, "embeddings", embeddings, EMBEDDINGS_TYPE)
            {
                findings.errors.push(AgentIssue {
                    node_id: node.id.to_string(),
                    message,
                });
            }
        }
    }
}

fn check_model(node: &AiNode<'_>, findings: &mut AiFindings) {
    let provider = text(node.config, "provider").unwrap_or(DEFAULT_PROVIDER);
    if text(node.config, "model").is_none() {
        findings
            .warnings
            .push(DocumentWarning::DefaultModel(node.id.to_string()));
    }

    let required: &[&str] = match provider {
        p if API_KEY_PROVIDERS.contains(&p) => &["apiKey"],
        "azure" => &["baseUrl", "apiVersion"],
        "aws" => &["region"],
        "ollama" => &["baseUrl"],
        _ => &[],
    };
    require_settings(node, provider, required, findings);
}

fn check_embeddings(node: &AiNode<'_>, findings: &mut AiFindings) {
    let provider = text(node.config, "provider").unwrap_or(DEFAULT_PROVIDER);
    if provider == "ollama" {
        require_settings(node, provider, &["baseUrl"], findings);
    }
}

fn require_settings(node: &AiNode<'_>, provider: &str, keys: &[&str], findings: &mut AiFindings) {
    for key in keys {
        if text(node.config, key).is_none() {
            findings
                .warnings
                .push(DocumentWarning::MissingProviderSetting {
                    node_id: node.id.to_string(),
                    provider: provider.to_string(),
                    setting: key.to_string(),
                });
        }
    }
}

fn reference_problem(
    types: &AHashMap<&str, &str>,
    key: &str,
    target: &str,
    expected: &str,
) -> Option<String> {
    match types.get(target) {
        Some(&found) if found == expected => None,
        Some(&found) => Some(format!(
            "'{}' refers to '{}', a {} node, not an {} node",
            key, target, found, expected
        )),
        None => Some(format!(
            "'{}' refers to '{}', which does not exist",
            key, target
        )),
    }
}

/// A non-blank string setting.
fn text<'c>(config: &'c Map<String, Value>, key: &str) -> Option<&'c str> {
    config
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
