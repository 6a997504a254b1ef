use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Top-level groupings for node types. The first segment of a node type names its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeCategory {
    Trigger,
    Web,
    Desktop,
    Files,
    Excel,
    Email,
    Api,
    Database,
    Document,
    Ai,
    Python,
    Control,
    Logging,
    Security,
    Human,
}

impl NodeCategory {
    pub const ALL: [NodeCategory; 15] = [
        NodeCategory::Trigger,
        NodeCategory::Web,
        NodeCategory::Desktop,
        NodeCategory::Files,
        NodeCategory::Excel,
        NodeCategory::Email,
        NodeCategory::Api,
        NodeCategory::Database,
        NodeCategory::Document,
        NodeCategory::Ai,
        NodeCategory::Python,
        NodeCategory::Control,
        NodeCategory::Logging,
        NodeCategory::Security,
        NodeCategory::Human,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeCategory::Trigger => "trigger",
            NodeCategory::Web => "web",
            NodeCategory::Desktop => "desktop",
            NodeCategory::Files => "files",
            NodeCategory::Excel => "excel",
            NodeCategory::Email => "email",
            NodeCategory::Api => "api",
            NodeCategory::Database => "database",
            NodeCategory::Document => "document",
            NodeCategory::Ai => "ai",
            NodeCategory::Python => "python",
            NodeCategory::Control => "control",
            NodeCategory::Logging => "logging",
            NodeCategory::Security => "security",
            NodeCategory::Human => "human",
        }
    }
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown node category '{}'", s))
    }
}

/// The editing surface of a single configuration field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FieldType {
    Text,
    Textarea,
    Number,
    Boolean,
    Password,
    Select { options: Vec<String> },
    /// A list of user-defined form fields (`[{ id, label, type, required }]`).
    FormBuilder,
    /// A list of validation rules (`[{ field, rule, ... }]`).
    ValidationBuilder,
    /// Free-form JSON, accepted as-is.
    Json,
}

impl FieldType {
    /// Human-readable name of the value shape this field accepts.
    pub fn expected(&self) -> String {
        match self {
            FieldType::Text | FieldType::Textarea | FieldType::Password => "a string".to_string(),
            FieldType::Number => "a number".to_string(),
            FieldType::Boolean => "a boolean".to_string(),
            FieldType::Select { options } => format!("one of [{}]", options.join(", ")),
            FieldType::FormBuilder => "a list of form field objects".to_string(),
            FieldType::ValidationBuilder => "a list of validation rule objects".to_string(),
            FieldType::Json => "any JSON value".to_string(),
        }
    }
}

/// Shows a field only while a sibling field holds a given value.
///
/// When `value` is an array, the field is visible while the sibling equals any of its items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibleWhen {
    pub field: String,
    pub value: Value,
}

/// Schema entry for one key of a node's configuration map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFieldDef {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub supports_expressions: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_when: Option<VisibleWhen>,
}

impl ConfigFieldDef {
    pub fn new(name: &str, label: &str, field_type: FieldType) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            field_type,
            required: false,
            default: None,
            placeholder: None,
            supports_expressions: false,
            visible_when: None,
        }
    }

    pub fn text(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldType::Text)
    }

    pub fn textarea(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldType::Textarea)
    }

    pub fn number(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldType::Number)
    }

    pub fn boolean(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldType::Boolean)
    }

    pub fn password(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldType::Password)
    }

    pub fn select(name: &str, label: &str, options: &[&str]) -> Self {
        Self::new(
            name,
            label,
            FieldType::Select {
                options: options.iter().map(|o| o.to_string()).collect(),
            },
        )
    }

    pub fn form_builder(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldType::FormBuilder)
    }

    pub fn validation_builder(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldType::ValidationBuilder)
    }

    pub fn json(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldType::Json)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    /// Allows `${Label.field}` interpolation in this field.
    pub fn expressions(mut self) -> Self {
        self.supports_expressions = true;
        self
    }

    pub fn visible_when(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.visible_when = Some(VisibleWhen {
            field: field.to_string(),
            value: value.into(),
        });
        self
    }
}

/// The value shape of a node output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    String,
    Number,
    Boolean,
    Object,
    Array,
    Any,
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputType::String => "string",
            OutputType::Number => "number",
            OutputType::Boolean => "boolean",
            OutputType::Object => "object",
            OutputType::Array => "array",
            OutputType::Any => "any",
        };
        f.write_str(name)
    }
}

/// A named value a node produces at run time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputFieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub output_type: OutputType,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

impl OutputFieldDef {
    pub fn new(name: &str, output_type: OutputType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            output_type,
            description: description.to_string(),
            example: None,
        }
    }

    pub fn example(mut self, example: impl Into<Value>) -> Self {
        self.example = Some(example.into());
        self
    }
}

/// The immutable description of one node type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTemplate {
    #[serde(rename = "type")]
    pub node_type: String,
    pub category: NodeCategory,
    pub label: String,
    pub description: String,
    pub config_schema: Vec<ConfigFieldDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<Vec<OutputFieldDef>>,
    #[serde(default)]
    pub default_config: Map<String, Value>,
}

impl NodeTemplate {
    pub fn new(node_type: &str, category: NodeCategory, label: &str, description: &str) -> Self {
        Self {
            node_type: node_type.to_string(),
            category,
            label: label.to_string(),
            description: description.to_string(),
            config_schema: Vec::new(),
            output_schema: None,
            default_config: Map::new(),
        }
    }

    /// Sets the config schema and seeds `default_config` from the fields' defaults.
    pub fn config(mut self, fields: Vec<ConfigFieldDef>) -> Self {
        for field in &fields {
            if let Some(default) = &field.default {
                self.default_config
                    .insert(field.name.clone(), default.clone());
            }
        }
        self.config_schema = fields;
        self
    }

    pub fn outputs(mut self, outputs: Vec<OutputFieldDef>) -> Self {
        self.output_schema = Some(outputs);
        self
    }

    /// Adds a default config entry that has no schema field of its own.
    pub fn with_default(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.default_config.insert(key.to_string(), value.into());
        self
    }

    pub fn field(&self, name: &str) -> Option<&ConfigFieldDef> {
        self.config_schema.iter().find(|f| f.name == name)
    }

    pub fn outputs_or_empty(&self) -> &[OutputFieldDef] {
        self.output_schema.as_deref().unwrap_or(&[])
    }
}
