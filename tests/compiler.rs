//! Tests for compiling graphs into bot documents.
mod common;
use botflow::dsl::{DSL_VERSION, VariableType};
use botflow::error::FieldIssue;
use botflow::prelude::*;
use common::*;
use serde_json::json;

#[test]
fn test_compiler_builds_trigger_and_request() {
    let graph = create_trigger_http_graph();
    let dsl = Compiler::builder(&graph, metadata())
        .build()
        .compile()
        .expect("Failed to compile");

    assert_eq!(dsl.version, DSL_VERSION);
    assert_eq!(dsl.start_node.as_deref(), Some("start"));
    assert_eq!(dsl.triggers, vec!["start".to_string()]);
    assert_eq!(dsl.nodes.len(), 2);

    let start = &dsl.nodes[0];
    assert_eq!(start.outputs.success, Target::Node("call".to_string()));
    assert_eq!(start.outputs.error, Target::End);

    let call = &dsl.nodes[1];
    assert_eq!(call.label, "Call");
    assert_eq!(call.config["url"], json!("https://example.com/api"));
    assert!(call.outputs.success.is_end());
    assert!(call.outputs.error.is_end());
}

#[test]
fn test_end_sentinel_in_json() {
    let dsl = compile(&create_trigger_http_graph(), metadata()).unwrap();
    let value = serde_json::to_value(&dsl).unwrap();

    assert_eq!(value["start_node"], json!("start"));
    assert_eq!(value["nodes"][0]["outputs"]["success"], json!("call"));
    assert_eq!(value["nodes"][0]["outputs"]["error"], json!("END"));
    assert_eq!(value["nodes"][1]["type"], json!("api.http_request"));
    // Leaves carry no children key at all
    assert!(value["nodes"][1].get("children").is_none());
}

#[test]
fn test_sentinel_matches_edges() {
    let graph = create_nested_graph();
    let dsl = compile(&graph, metadata()).unwrap();

    for node in dsl.walk() {
        for handle in Handle::ALL {
            let edge = graph.outgoing(&node.id, handle);
            let target = node.outputs.get(handle);
            match edge {
                Some(edge) => assert_eq!(target.node_id(), Some(edge.target.as_str())),
                None => assert!(target.is_end(), "{} {} should be END", node.id, handle),
            }
        }
    }
}

#[test]
fn test_loop_child_nests_with_self_loop() {
    let dsl = compile(&create_loop_graph(), metadata()).unwrap();

    let top: Vec<&str> = dsl.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(top, vec!["start", "loop"]);

    let each = &dsl.nodes[1];
    assert_eq!(each.children.len(), 1);
    let tick = &each.children[0];
    assert_eq!(tick.id, "tick");
    assert_eq!(tick.outputs.success, Target::Node("tick".to_string()));
    assert!(tick.children.is_empty());

    assert_eq!(dsl.walk().iter().filter(|n| n.id == "tick").count(), 1);
}

#[test]
fn test_nested_containers_keep_structure() {
    let dsl = compile(&create_nested_graph(), metadata()).unwrap();

    let guard = dsl.find_node("guard").unwrap();
    assert_eq!(guard.outputs.error, Target::Node("report".to_string()));
    assert_eq!(guard.children.len(), 1);
    assert_eq!(guard.children[0].id, "check");
    assert_eq!(guard.children[0].children[0].id, "inner");

    for node in dsl.walk() {
        if !node.children.is_empty() {
            assert!(is_container(&node.node_type));
        }
    }
}

#[test]
fn test_all_invalid_nodes_are_reported() {
    let mut graph = create_trigger_http_graph();
    graph.config_mut("call").unwrap().remove("url");
    graph.add_node(node("log", "logging.log", "Log")).unwrap();
    graph.connect("call", "log", Handle::Success).unwrap();

    let errors = compile(&graph, metadata()).expect_err("two nodes are invalid");
    assert_eq!(errors.len(), 2);
    assert_eq!(
        errors[0],
        CompileError::InvalidConfig {
            node_id: "call".to_string(),
            issue: FieldIssue::MissingRequiredField {
                field: "url".to_string()
            },
        }
    );
    assert_eq!(errors[1].node_id(), Some("log"));
}

#[test]
fn test_unknown_type_is_reported_with_other_errors() {
    let mut graph = create_trigger_http_graph();
    graph
        .add_node(GraphNode::new("odd", "web.teleport", NodeCategory::Web, "Odd"))
        .unwrap();
    graph.config_mut("call").unwrap().insert("url".to_string(), json!(null));

    let errors = compile(&graph, metadata()).unwrap_err();
    assert!(errors.contains(&CompileError::UnknownNodeType {
        node_id: "odd".to_string(),
        type_name: "web.teleport".to_string(),
    }));
    assert!(errors.iter().any(|e| e.node_id() == Some("call")));
}

#[test]
fn test_structural_errors_from_deserialized_graph() {
    let json = r#"{
        "nodes": [
            { "id": "t", "type": "trigger.manual", "label": "T", "category": "trigger" },
            { "id": "w", "type": "control.wait", "label": "W", "category": "control",
              "config": { "seconds": 1 }, "parentId": "t" }
        ],
        "edges": [
            { "id": "e1", "source": "t", "target": "w", "sourceHandle": "success" },
            { "id": "e2", "source": "t", "target": "gone", "sourceHandle": "success" }
        ]
    }"#;
    let graph: GraphModel = serde_json::from_str(json).unwrap();
    let errors = compile(&graph, metadata()).unwrap_err();

    assert!(errors.contains(&CompileError::DanglingEdgeReference {
        edge_id: "e2".to_string(),
        missing_node_id: "gone".to_string(),
    }));
    assert!(errors.contains(&CompileError::DuplicateOutgoingEdge {
        source_node_id: "t".to_string(),
        handle: Handle::Success,
    }));
    assert!(errors.iter().any(
        |e| matches!(e, CompileError::InvalidContainment { node_id, .. } if node_id == "w")
    ));
}

#[test]
fn test_start_node_without_trigger() {
    let mut graph = GraphModel::new();
    graph
        .add_node(node("first", "logging.log", "First").with_config("message", "a"))
        .unwrap();
    graph
        .add_node(node("second", "logging.log", "Second").with_config("message", "b"))
        .unwrap();

    let dsl = compile(&graph, metadata()).unwrap();
    assert!(dsl.triggers.is_empty());
    assert_eq!(dsl.start_node.as_deref(), Some("first"));
}

#[test]
fn test_nested_triggers_are_not_entry_points() {
    let mut graph = create_loop_graph();
    graph
        .add_node(node("late", "trigger.manual", "Late").with_parent("loop"))
        .unwrap();

    let dsl = compile(&graph, metadata()).unwrap();
    assert_eq!(dsl.triggers, vec!["start".to_string()]);
}

#[test]
fn test_empty_graph_compiles_to_empty_document() {
    let dsl = compile(&GraphModel::new(), metadata()).unwrap();
    assert!(dsl.nodes.is_empty());
    assert!(dsl.start_node.is_none());
    assert_eq!(dsl.bot.name, "Test Bot");
}

#[test]
fn test_nesting_depth_is_bounded() {
    let graph = create_nested_graph();
    let errors = Compiler::builder(&graph, metadata())
        .with_max_depth(1)
        .build()
        .compile()
        .unwrap_err();
    assert_eq!(
        errors,
        vec![CompileError::NestingTooDeep {
            node_id: "inner".to_string(),
            max_depth: 1,
        }]
    );
}

#[test]
fn test_builder_options() {
    let registry = NodeTemplateRegistry::builder()
        .with_builtin()
        .build()
        .unwrap();
    let graph = create_trigger_http_graph();
    let dsl = Compiler::builder(&graph, metadata().with_description("Calls an API"))
        .with_registry(&registry)
        .with_variable(
            "apiKey",
            VariableDefinition {
                var_type: VariableType::Credential,
                value: None,
                vault: Some("api/key".to_string()),
                description: None,
            },
        )
        .build()
        .compile()
        .unwrap();

    assert_eq!(dsl.bot.description.as_deref(), Some("Calls an API"));
    let value = serde_json::to_value(&dsl).unwrap();
    assert_eq!(value["variables"]["apiKey"]["type"], json!("credential"));
    assert_eq!(value["variables"]["apiKey"]["vault"], json!("api/key"));
}

#[test]
fn test_positions_are_carried() {
    let dsl = compile(&create_trigger_http_graph(), metadata()).unwrap();
    assert_eq!(dsl.nodes[1].position, Position::new(250.0, 0.0));
}

#[test]
fn test_stored_category_must_match_registry() {
    // Each node claims the other's category
    let json = r#"{
        "nodes": [
            { "id": "log", "type": "logging.log", "label": "Log", "category": "trigger",
              "config": { "message": "hi", "level": "INFO" } },
            { "id": "t", "type": "trigger.manual", "label": "Start", "category": "logging" }
        ],
        "edges": [
            { "id": "t-success-log", "source": "t", "target": "log", "sourceHandle": "success" }
        ]
    }"#;
    let graph: GraphModel = serde_json::from_str(json).unwrap();
    let errors = compile(&graph, metadata()).unwrap_err();

    assert_eq!(
        errors,
        vec![
            CompileError::CategoryMismatch {
                node_id: "log".to_string(),
                node_type: "logging.log".to_string(),
                expected: NodeCategory::Logging,
                actual: NodeCategory::Trigger,
            },
            CompileError::CategoryMismatch {
                node_id: "t".to_string(),
                node_type: "trigger.manual".to_string(),
                expected: NodeCategory::Trigger,
                actual: NodeCategory::Logging,
            },
        ]
    );

    // With matching categories the trigger list follows the node types
    let fixed = json
        .replace(r#""category": "trigger""#, r#""category": "x""#)
        .replace(r#""category": "logging""#, r#""category": "trigger""#)
        .replace(r#""category": "x""#, r#""category": "logging""#);
    let graph: GraphModel = serde_json::from_str(&fixed).unwrap();
    let dsl = compile(&graph, metadata()).unwrap();
    assert_eq!(dsl.triggers, vec!["t".to_string()]);
    assert_eq!(dsl.start_node.as_deref(), Some("t"));
}

fn agent_graph(model: Option<&str>) -> GraphModel {
    let mut graph = GraphModel::new();
    graph.add_node(node("start", "trigger.manual", "Start")).unwrap();
    let mut agent =
        node("agent", "ai.agent", "Agent").with_config("message", "Summarise the inbox");
    if let Some(model) = model {
        agent = agent.with_config("model", model);
    }
    graph.add_node(agent).unwrap();
    graph
        .add_node(node("gpt", "ai.model", "GPT").with_config("model", "gpt-4o"))
        .unwrap();
    graph.connect("start", "agent", Handle::Success).unwrap();
    graph
}

#[test]
fn test_agent_needs_a_model_node() {
    let errors = compile(&agent_graph(None), metadata()).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        CompileError::InvalidAgentModel { node_id, .. } if node_id == "agent"
    ));

    let errors = compile(&agent_graph(Some("start")), metadata()).unwrap_err();
    assert!(matches!(
        &errors[0],
        CompileError::InvalidAgentModel { message, .. } if message.contains("trigger.manual")
    ));

    // A missing API key is only logged
    let dsl = compile(&agent_graph(Some("gpt")), metadata()).unwrap();
    let ids: Vec<&str> = dsl.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["start", "agent", "gpt"]);
    assert_eq!(dsl.triggers, vec!["start".to_string()]);
}
