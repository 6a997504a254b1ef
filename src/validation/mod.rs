use crate::error::{FieldIssue, RegistryError};
use crate::graph::GraphNode;
use crate::registry::{ConfigFieldDef, FieldType, NodeTemplate, NodeTemplateRegistry};
use serde_json::{Map, Value};

/// Outcome of validating one node's configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(Vec<FieldIssue>),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn issues(&self) -> &[FieldIssue] {
        match self {
            ValidationResult::Valid => &[],
            ValidationResult::Invalid(issues) => issues,
        }
    }

    pub fn into_issues(self) -> Vec<FieldIssue> {
        match self {
            ValidationResult::Valid => Vec::new(),
            ValidationResult::Invalid(issues) => issues,
        }
    }
}

/// Validates node configurations against their template's config schema.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Checks every schema field of `template` against `node.config`, in schema order.
    ///
    /// Fields hidden by their `visible_when` rule are skipped entirely. Keys in the config
    /// that the schema does not declare are ignored.
    pub fn validate(node: &GraphNode, template: &NodeTemplate) -> ValidationResult {
        let mut issues = Vec::new();
        for field in &template.config_schema {
            if !Self::is_visible(field, &node.config, template) {
                continue;
            }
            match node.config.get(&field.name) {
                Some(value) if !is_empty(value) => {
                    if let Some(issue) = Self::check_shape(field, value) {
                        issues.push(issue);
                    }
                }
                _ if field.required => issues.push(FieldIssue::MissingRequiredField {
                    field: field.name.clone(),
                }),
                _ => {}
            }
        }

        if issues.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(issues)
        }
    }

    /// Looks up the node's template and validates against it.
    ///
    /// An unregistered type is reported as a `RegistryError`, never as a field issue.
    pub fn validate_node(
        registry: &NodeTemplateRegistry,
        node: &GraphNode,
    ) -> Result<ValidationResult, RegistryError> {
        let template = registry.lookup(&node.node_type)?;
        Ok(Self::validate(node, template))
    }

    /// Evaluates a field's `visible_when` rule against its siblings.
    ///
    /// A sibling missing from the config falls back to that sibling's schema default.
    pub fn is_visible(
        field: &ConfigFieldDef,
        config: &Map<String, Value>,
        template: &NodeTemplate,
    ) -> bool {
        let Some(rule) = &field.visible_when else {
            return true;
        };
        let sibling = config
            .get(&rule.field)
            .or_else(|| template.field(&rule.field).and_then(|f| f.default.as_ref()));
        let Some(sibling) = sibling else {
            return false;
        };
        match &rule.value {
            Value::Array(allowed) => allowed.contains(sibling),
            expected => expected == sibling,
        }
    }

    fn check_shape(field: &ConfigFieldDef, value: &Value) -> Option<FieldIssue> {
        let expression_ok = field.supports_expressions && is_expression(value);
        let accepted = match &field.field_type {
            FieldType::Text | FieldType::Textarea | FieldType::Password => value.is_string(),
            FieldType::Number => value.is_number() || expression_ok,
            FieldType::Boolean => value.is_boolean() || expression_ok,
            FieldType::Select { options } => {
                expression_ok
                    || value
                        .as_str()
                        .is_some_and(|s| options.iter().any(|o| o == s))
            }
            FieldType::FormBuilder | FieldType::ValidationBuilder => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_object)),
            FieldType::Json => true,
        };

        if accepted {
            return None;
        }
        let actual = match (&field.field_type, value) {
            (FieldType::Select { .. }, Value::String(s)) => format!("'{}'", s),
            _ => kind_of(value).to_string(),
        };
        Some(FieldIssue::InvalidFieldType {
            field: field.name.clone(),
            expected: field.field_type.expected(),
            actual,
        })
    }
}

/// `null`, blank strings, and empty arrays count as "no value".
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn is_expression(value: &Value) -> bool {
    value.as_str().is_some_and(|s| s.contains("${"))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
