//! Common test utilities for building bot graphs and documents.
use botflow::prelude::*;

/// Creates a node of a built-in type, seeded with the template's defaults.
#[allow(dead_code)]
pub fn node(id: &str, node_type: &str, label: &str) -> GraphNode {
    let template = NodeTemplateRegistry::builtin()
        .lookup(node_type)
        .expect("built-in node type");
    GraphNode::from_template(id, template, label)
}

#[allow(dead_code)]
pub fn metadata() -> BotMetadata {
    BotMetadata::new("bot-1", "Test Bot")
}

/// A manual trigger "Start" feeding an HTTP request "Call".
///
/// `start --success--> call`, both of `call`'s handles unconnected.
#[allow(dead_code)]
pub fn create_trigger_http_graph() -> GraphModel {
    let mut graph = GraphModel::new();
    graph
        .add_node(node("start", "trigger.manual", "Start").with_position(0.0, 0.0))
        .unwrap();
    graph
        .add_node(
            node("call", "api.http_request", "Call")
                .with_config("url", "https://example.com/api")
                .with_position(250.0, 0.0),
        )
        .unwrap();
    graph.connect("start", "call", Handle::Success).unwrap();
    graph
}

/// A loop container "Each" whose child "Tick" links back to itself.
///
/// `start --success--> loop`, `tick` nested in `loop`, `tick --success--> tick`.
#[allow(dead_code)]
pub fn create_loop_graph() -> GraphModel {
    let mut graph = GraphModel::new();
    graph.add_node(node("start", "trigger.manual", "Start")).unwrap();
    graph
        .add_node(node("loop", "control.loop", "Each").with_config("items", "${Start.startedAt}"))
        .unwrap();
    graph
        .add_node(
            node("tick", "logging.log", "Tick")
                .with_config("message", "tick")
                .with_parent("loop"),
        )
        .unwrap();
    graph.connect("start", "loop", Handle::Success).unwrap();
    graph.connect("tick", "tick", Handle::Success).unwrap();
    graph
}

/// A try/catch holding a conditional that holds a log node, with an error route.
///
/// `start -> guard`, `guard --error--> report`, `check` in `guard`, `inner` in `check`.
#[allow(dead_code)]
pub fn create_nested_graph() -> GraphModel {
    let mut graph = GraphModel::new();
    graph.add_node(node("start", "trigger.manual", "Start")).unwrap();
    graph.add_node(node("guard", "control.try_catch", "Guard")).unwrap();
    graph
        .add_node(
            node("check", "control.if", "Check")
                .with_config("condition", "${Start.startedAt} != ''")
                .with_parent("guard"),
        )
        .unwrap();
    graph
        .add_node(
            node("inner", "logging.log", "Inner")
                .with_config("message", "inside")
                .with_parent("check"),
        )
        .unwrap();
    graph
        .add_node(node("report", "logging.log", "Report").with_config("message", "${Guard.error}"))
        .unwrap();
    graph.connect("start", "guard", Handle::Success).unwrap();
    graph.connect("guard", "report", Handle::Error).unwrap();
    graph
}

/// An editor canvas export: a form trigger feeding a POST request.
///
/// The child node is listed before its container and one edge omits `sourceHandle`.
#[allow(dead_code)]
pub const EDITOR_JSON: &str = r#"{
  "nodes": [
    {
      "id": "log",
      "type": "custom",
      "position": { "x": 40, "y": 60 },
      "parentNode": "each",
      "data": {
        "nodeType": "logging.log",
        "label": "Log",
        "config": { "message": "row received" }
      }
    },
    {
      "id": "form",
      "type": "custom",
      "position": { "x": 0, "y": 0 },
      "data": {
        "nodeType": "trigger.form",
        "label": "Signup",
        "config": {
          "formTitle": "Sign up",
          "fields": [
            { "id": "email", "label": "Email", "type": "email" },
            { "id": "age", "label": "Age", "type": "number" }
          ]
        }
      }
    },
    {
      "id": "post",
      "type": "custom",
      "position": { "x": 250, "y": 0 },
      "data": {
        "nodeType": "api.http_request",
        "label": "Post",
        "config": {
          "method": "POST",
          "url": "https://example.com/users",
          "body": { "email": "${Signup.formData.email}" }
        },
        "category": "api"
      }
    },
    {
      "id": "each",
      "type": "group",
      "position": { "x": 500, "y": 0 },
      "data": {
        "nodeType": "control.loop",
        "label": "Each",
        "config": { "items": "${Post.body}" }
      }
    }
  ],
  "edges": [
    { "id": "e1", "source": "form", "target": "post" },
    { "id": "e2", "source": "post", "target": "each", "sourceHandle": "success" }
  ]
}"#;
