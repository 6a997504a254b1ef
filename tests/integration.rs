//! Integration tests for botflow
//!
//! End-to-end tests from an editor export through compilation, persistence and loading.
//!
mod common;
use botflow::prelude::*;
use common::*;
use std::fs;

#[cfg(test)]
mod integration_tests {
    use super::*;

    fn editor_graph() -> GraphModel {
        EditorDocument::from_json(EDITOR_JSON)
            .expect("Failed to parse editor JSON")
            .into_graph(NodeTemplateRegistry::builtin())
            .expect("Failed to convert editor document")
    }

    #[test]
    fn test_editor_document_conversion() {
        let graph = editor_graph();

        // Parents are placed before their children regardless of file order
        let ids: Vec<&str> = graph.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["form", "post", "each", "log"]);
        assert_eq!(graph.node("log").unwrap().parent_id.as_deref(), Some("each"));
        assert_eq!(graph.node("form").unwrap().category, NodeCategory::Trigger);

        // A missing sourceHandle means success; explicit ids are kept
        let first = graph.edge("e1").unwrap();
        assert_eq!(first.source_handle, Handle::Success);
        assert_eq!(graph.edges().len(), 2);
    }

    #[test]
    fn test_editor_to_dsl_to_file_and_back() {
        let graph = editor_graph();
        let dsl = Compiler::builder(&graph, BotMetadata::new("signup", "Signup Flow"))
            .build()
            .compile()
            .expect("Failed to compile editor graph");

        assert_eq!(dsl.start_node.as_deref(), Some("form"));
        assert_eq!(dsl.triggers, vec!["form".to_string()]);
        let each = dsl.find_node("each").unwrap();
        assert_eq!(each.children.len(), 1);
        assert!(each.children[0].outputs.success.is_end());

        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("signup.bot.json");
        fs::write(&path, dsl.to_json_pretty().unwrap()).unwrap();

        let json = fs::read_to_string(&path).unwrap();
        let loaded = Loader::new().load_str(&json).expect("Failed to load saved bot");

        assert_eq!(loaded.nodes().len(), graph.nodes().len());
        for original in graph.nodes() {
            let reloaded = loaded.node(&original.id).expect("node survives");
            assert_eq!(reloaded.node_type, original.node_type);
            assert_eq!(reloaded.label, original.label);
            assert_eq!(reloaded.config, original.config);
            assert_eq!(reloaded.parent_id, original.parent_id);
            assert_eq!(reloaded.position, original.position);
        }

        let mut expected: Vec<(String, String, Handle)> = graph
            .edges()
            .iter()
            .map(|e| (e.source.clone(), e.target.clone(), e.source_handle))
            .collect();
        let mut actual: Vec<(String, String, Handle)> = loaded
            .edges()
            .iter()
            .map(|e| (e.source.clone(), e.target.clone(), e.source_handle))
            .collect();
        expected.sort();
        actual.sort();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_loaded_graph_renders_back_to_editor() {
        let dsl = compile(&create_nested_graph(), metadata()).unwrap();
        let graph = load(&dsl).unwrap();
        let document = EditorDocument::from_graph(&graph);

        let inner = document.nodes.iter().find(|n| n.id == "inner").unwrap();
        assert_eq!(inner.parent_node.as_deref(), Some("check"));
        assert_eq!(inner.data.node_type, "logging.log");
        assert_eq!(inner.data.category, Some(NodeCategory::Logging));

        let json = document.to_json_pretty().unwrap();
        assert!(json.contains("\"parentNode\": \"check\""));
        assert!(json.contains("\"sourceHandle\": \"error\""));

        let reparsed = EditorDocument::from_json(&json)
            .unwrap()
            .into_graph(NodeTemplateRegistry::builtin())
            .unwrap();
        assert_eq!(reparsed, graph);
    }

    #[test]
    fn test_parent_id_alias_is_accepted() {
        let json = r#"{
            "nodes": [
                { "id": "l", "position": { "x": 0, "y": 0 },
                  "data": { "nodeType": "control.loop", "label": "L",
                            "config": { "items": "x" } } },
                { "id": "c", "parentId": "l", "position": { "x": 0, "y": 0 },
                  "data": { "nodeType": "logging.log", "label": "C",
                            "config": { "message": "m" } } }
            ],
            "edges": [ { "source": "c", "target": "c", "sourceHandle": "success" } ]
        }"#;
        let graph = EditorDocument::from_json(json)
            .unwrap()
            .into_graph(NodeTemplateRegistry::builtin())
            .unwrap();

        assert_eq!(graph.node("c").unwrap().parent_id.as_deref(), Some("l"));
        assert_eq!(graph.edges()[0].id, "c-success-c");

        let dsl = compile(&graph, metadata()).unwrap();
        assert_eq!(dsl.nodes.len(), 1);
        assert_eq!(dsl.nodes[0].children[0].outputs.success, Target::Node("c".to_string()));
    }

    #[test]
    fn test_conversion_errors() {
        let unknown = r#"{
            "nodes": [ { "id": "x", "data": { "nodeType": "web.teleport", "label": "X" } } ]
        }"#;
        let result = EditorDocument::from_json(unknown)
            .unwrap()
            .into_graph(NodeTemplateRegistry::builtin());
        assert_eq!(
            result,
            Err(ConversionError::UnknownNodeType {
                node_id: "x".to_string(),
                type_name: "web.teleport".to_string(),
            })
        );

        let bad_handle = r#"{
            "nodes": [
                { "id": "a", "data": { "nodeType": "trigger.manual", "label": "A" } },
                { "id": "b", "data": { "nodeType": "trigger.manual", "label": "B" } }
            ],
            "edges": [ { "source": "a", "target": "b", "sourceHandle": "output-0" } ]
        }"#;
        let result = EditorDocument::from_json(bad_handle)
            .unwrap()
            .into_graph(NodeTemplateRegistry::builtin());
        assert!(matches!(result, Err(ConversionError::ValidationError(_))));

        let dangling = r#"{
            "nodes": [ { "id": "a", "data": { "nodeType": "trigger.manual", "label": "A" } } ],
            "edges": [ { "source": "a", "target": "z" } ]
        }"#;
        let result = EditorDocument::from_json(dangling)
            .unwrap()
            .into_graph(NodeTemplateRegistry::builtin());
        assert!(matches!(
            result,
            Err(ConversionError::Graph(GraphError::DanglingEdgeReference { .. }))
        ));
    }

    #[test]
    fn test_invalid_editor_graph_reports_everything() {
        let mut document = EditorDocument::from_json(EDITOR_JSON).unwrap();
        for node in &mut document.nodes {
            node.data.config.clear();
        }
        let graph = document
            .into_graph(NodeTemplateRegistry::builtin())
            .unwrap();

        let errors = compile(&graph, metadata()).unwrap_err();
        let mut nodes: Vec<&str> = errors.iter().filter_map(|e| e.node_id()).collect();
        nodes.dedup();
        // Reported in graph order, which places `log` after its container
        assert_eq!(nodes, vec!["form", "post", "each", "log"]);
    }

    #[test]
    fn test_editor_category_must_match_registry() {
        let json = r#"{
            "nodes": [
                { "id": "log",
                  "data": { "nodeType": "logging.log", "label": "Log", "category": "trigger",
                            "config": { "message": "m" } } },
                { "id": "t",
                  "data": { "nodeType": "trigger.manual", "label": "T", "category": "logging" } }
            ],
            "edges": [ { "source": "t", "target": "log" } ]
        }"#;
        let result = EditorDocument::from_json(json)
            .unwrap()
            .into_graph(NodeTemplateRegistry::builtin());
        assert_eq!(
            result,
            Err(ConversionError::CategoryMismatch {
                node_id: "log".to_string(),
                node_type: "logging.log".to_string(),
                expected: NodeCategory::Logging,
                actual: NodeCategory::Trigger,
            })
        );

        // Without stored categories the registry decides, and compile agrees
        let json = json
            .replace(r#", "category": "trigger""#, "")
            .replace(r#", "category": "logging""#, "");
        let graph = EditorDocument::from_json(&json)
            .unwrap()
            .into_graph(NodeTemplateRegistry::builtin())
            .unwrap();
        assert_eq!(graph.node("log").unwrap().category, NodeCategory::Logging);
        let dsl = compile(&graph, metadata()).unwrap();
        assert_eq!(dsl.triggers, vec!["t".to_string()]);
        assert_eq!(load(&dsl).unwrap(), graph);
    }

    #[test]
    fn test_editor_edges_keep_custom_ids() {
        let json = r#"{
            "nodes": [
                { "id": "a", "data": { "nodeType": "trigger.manual", "label": "A" } },
                { "id": "b", "data": { "nodeType": "logging.log", "label": "B",
                                       "config": { "message": "m" } } }
            ],
            "edges": [
                { "id": "reactflow__edge-1", "source": "a", "target": "b" },
                { "source": "a", "target": "b", "sourceHandle": "error" }
            ]
        }"#;
        let graph = EditorDocument::from_json(json)
            .unwrap()
            .into_graph(NodeTemplateRegistry::builtin())
            .unwrap();
        let ids: Vec<&str> = graph.edges().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["reactflow__edge-1", "a-error-b"]);
    }
}
