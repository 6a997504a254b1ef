//! Tests for the node template registry and container classification.
mod common;
use botflow::prelude::*;
use botflow::registry::{ConfigFieldDef, FieldType, OutputFieldDef, OutputType};
use serde_json::json;

#[test]
fn test_builtin_lookup() {
    let registry = NodeTemplateRegistry::builtin();

    let http = registry.lookup("api.http_request").expect("http template");
    assert_eq!(http.category, NodeCategory::Api);
    assert_eq!(http.label, "HTTP Request");

    let url = http.field("url").expect("url field");
    assert!(url.required);
    assert!(url.supports_expressions);
    assert_eq!(url.field_type, FieldType::Text);

    // Defaults are collected into the template's default config
    assert_eq!(http.default_config.get("method"), Some(&json!("GET")));
    assert_eq!(http.default_config.get("timeout"), Some(&json!(30)));
    assert!(!http.default_config.contains_key("url"));
}

#[test]
fn test_unknown_type_is_an_error() {
    let result = NodeTemplateRegistry::builtin().lookup("web.teleport");
    assert_eq!(
        result.err(),
        Some(RegistryError::UnknownNodeType("web.teleport".to_string()))
    );
}

#[test]
fn test_every_builtin_type_matches_its_category() {
    let registry = NodeTemplateRegistry::builtin();
    assert!(!registry.is_empty());

    for template in registry.iter() {
        let prefix = template
            .node_type
            .split('.')
            .next()
            .expect("node types have a category prefix");
        assert_eq!(
            prefix,
            template.category.as_str(),
            "{} is filed under {}",
            template.node_type,
            template.category
        );
    }
}

#[test]
fn test_by_category_keeps_catalog_order() {
    let registry = NodeTemplateRegistry::builtin();
    let triggers: Vec<&str> = registry
        .by_category(NodeCategory::Trigger)
        .iter()
        .map(|t| t.node_type.as_str())
        .collect();
    assert_eq!(triggers.first(), Some(&"trigger.manual"));
    assert!(triggers.contains(&"trigger.form"));
    assert!(triggers.contains(&"trigger.schedule"));

    let categories = registry.categories();
    assert_eq!(categories, NodeCategory::ALL.to_vec());

    let desktop: Vec<&str> = registry
        .by_category(NodeCategory::Desktop)
        .iter()
        .map(|t| t.node_type.as_str())
        .collect();
    assert_eq!(desktop.first(), Some(&"desktop.open_app"));
    assert!(desktop.contains(&"desktop.hotkey"));
}

#[test]
fn test_every_category_has_templates() {
    let registry = NodeTemplateRegistry::builtin();
    for category in NodeCategory::ALL {
        assert!(
            !registry.by_category(category).is_empty(),
            "no templates filed under {}",
            category
        );
    }

    for node_type in [
        "trigger.queue",
        "trigger.chat",
        "web.open_browser",
        "web.close_browser",
        "files.copy",
        "files.unzip",
        "excel.open",
        "excel.pivot",
        "email.reply",
        "email.search",
        "api.graphql",
        "api.oauth_token",
        "ai.agent",
        "ai.model",
        "ai.embeddings",
    ] {
        assert!(registry.contains(node_type), "{} is registered", node_type);
    }
}

#[test]
fn test_agent_templates() {
    let registry = NodeTemplateRegistry::builtin();
    let agent = registry.lookup("ai.agent").unwrap();
    assert!(agent.field("message").unwrap().required);
    assert_eq!(agent.default_config.get("memory"), Some(&json!("none")));
    assert!(agent.output_schema.is_some());

    let model = registry.lookup("ai.model").unwrap();
    assert_eq!(model.default_config.get("provider"), Some(&json!("openai")));
    let base_url = model.field("baseUrl").unwrap().visible_when.clone().unwrap();
    assert_eq!(base_url.value, json!(["azure", "ollama"]));
    assert!(model.outputs_or_empty().is_empty());
}

#[test]
fn test_custom_registry_rejects_duplicates() {
    let template = NodeTemplate::new(
        "custom.ping",
        NodeCategory::Api,
        "Ping",
        "Ping a host",
    );
    let result = NodeTemplateRegistry::builder()
        .with_template(template.clone())
        .with_template(template)
        .build();
    assert_eq!(
        result.err(),
        Some(RegistryError::DuplicateNodeType("custom.ping".to_string()))
    );

    let shadowed = NodeTemplateRegistry::builder()
        .with_builtin()
        .with_template(NodeTemplate::new(
            "logging.log",
            NodeCategory::Logging,
            "Log",
            "Shadow",
        ))
        .build();
    assert!(shadowed.is_err());
}

#[test]
fn test_custom_registry_extends_builtin() {
    let registry = NodeTemplateRegistry::builder()
        .with_builtin()
        .with_template(
            NodeTemplate::new("custom.ping", NodeCategory::Api, "Ping", "Ping a host")
                .config(vec![ConfigFieldDef::text("host", "Host").required()])
                .outputs(vec![OutputFieldDef::new(
                    "latency",
                    OutputType::Number,
                    "Round trip in ms",
                )]),
        )
        .build()
        .expect("registry builds");

    assert_eq!(registry.len(), NodeTemplateRegistry::builtin().len() + 1);
    assert!(registry.contains("custom.ping"));
    assert!(registry.contains("trigger.manual"));
    assert_eq!(
        registry.lookup("custom.ping").unwrap().outputs_or_empty().len(),
        1
    );
}

#[test]
fn test_container_classification() {
    let containers = [
        ("control.if", ContainerKind::Conditional),
        ("control.loop", ContainerKind::ForEach),
        ("control.while", ContainerKind::While),
        ("control.try_catch", ContainerKind::TryCatch),
        ("control.parallel", ContainerKind::Parallel),
    ];
    for (node_type, kind) in containers {
        assert!(is_container(node_type), "{} is a container", node_type);
        assert_eq!(ContainerKind::from_node_type(node_type), Some(kind));
        assert_eq!(kind.node_type(), node_type);
    }

    // Same prefix, still leaves
    for node_type in ["control.wait", "control.stop", "control.set_variable", "logging.log"] {
        assert!(!is_container(node_type), "{} is a leaf", node_type);
    }
    assert!(!is_container("control"));
    assert!(!is_container("control.loop.extra"));
}

#[test]
fn test_every_container_is_registered() {
    let registry = NodeTemplateRegistry::builtin();
    for kind in ContainerKind::ALL {
        let template = registry.lookup(kind.node_type()).expect("container template");
        assert_eq!(template.category, NodeCategory::Control);
    }
}

#[test]
fn test_template_serializes_with_type_key() {
    let template = NodeTemplateRegistry::builtin()
        .lookup("control.wait")
        .unwrap();
    let value = serde_json::to_value(template).unwrap();

    assert_eq!(value["type"], json!("control.wait"));
    assert_eq!(value["category"], json!("control"));
    assert_eq!(value["configSchema"][0]["name"], json!("seconds"));
    assert_eq!(value["configSchema"][0]["type"]["kind"], json!("number"));
    assert_eq!(value["configSchema"][0]["supportsExpressions"], json!(true));
}

#[test]
fn test_category_parsing() {
    assert_eq!("control".parse::<NodeCategory>(), Ok(NodeCategory::Control));
    assert!("robots".parse::<NodeCategory>().is_err());
}
