use super::ExpressionResolver;
use crate::error::ResolveError;
use crate::graph::GraphModel;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::sync::OnceLock;

/// A `${Label.path}` occurrence inside a config string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpressionRef {
    pub label: String,
    pub path: String,
    /// The full matched text, including `${` and `}`.
    pub raw: String,
}

/// A reference in a node's config that does not resolve to a visible upstream output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnresolvedReference {
    /// Top-level config key the reference was found under.
    pub config_key: String,
    pub expression: String,
}

fn reference_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Label: anything up to the first dot. Path: anything up to the closing brace.
        Regex::new(r"\$\{\s*([^.{}]+?)\s*\.\s*([^{}]+?)\s*\}")
            .expect("reference pattern is a valid regex")
    })
}

/// Finds every `${Label.path}` reference in `text`, in order of appearance.
pub fn extract_references(text: &str) -> Vec<ExpressionRef> {
    reference_pattern()
        .captures_iter(text)
        .map(|caps| ExpressionRef {
            label: caps[1].to_string(),
            path: caps[2].to_string(),
            raw: caps[0].to_string(),
        })
        .collect()
}

impl ExpressionResolver<'_> {
    /// Reports references in `node_id`'s config that name no visible upstream output.
    ///
    /// A reference resolves when its label matches a predecessor and its path is one of that
    /// predecessor's fields or descends into one (`body.items`, `rows[0]`).
    pub fn unresolved_references(
        &self,
        graph: &GraphModel,
        node_id: &str,
    ) -> Result<Vec<UnresolvedReference>, ResolveError> {
        let node = graph
            .node(node_id)
            .ok_or_else(|| ResolveError::NodeNotFound(node_id.to_string()))?;
        let available = self.available_variables(graph, node_id)?;

        let mut unresolved = Vec::new();
        for (key, value) in &node.config {
            let mut strings = Vec::new();
            collect_strings(value, &mut strings);
            for text in strings {
                for reference in extract_references(text) {
                    let resolved = available.iter().any(|v| {
                        v.node_label == reference.label && path_matches(&v.field, &reference.path)
                    });
                    if !resolved {
                        unresolved.push(UnresolvedReference {
                            config_key: key.clone(),
                            expression: reference.raw,
                        });
                    }
                }
            }
        }
        Ok(unresolved)
    }
}

fn path_matches(field: &str, path: &str) -> bool {
    match path.strip_prefix(field) {
        Some(rest) => rest.is_empty() || rest.starts_with('.') || rest.starts_with('['),
        None => false,
    }
}

fn collect_strings<'v>(value: &'v Value, out: &mut Vec<&'v str>) {
    match value {
        Value::String(s) => out.push(s),
        Value::Array(items) => items.iter().for_each(|v| collect_strings(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect_strings(v, out)),
        _ => {}
    }
}
