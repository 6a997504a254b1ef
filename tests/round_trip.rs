//! Seeded random graphs taken through compile and load.
mod common;
use botflow::prelude::*;
use common::*;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

const LEAVES: &[&str] = &["logging.log", "control.wait", "control.set_variable"];
const CONTAINERS: &[&str] = &["control.loop", "control.if", "control.try_catch"];
const MAX_NODES: usize = 40;

struct RandomGraph {
    rng: StdRng,
    graph: GraphModel,
    next_id: usize,
    next_edge: usize,
}

impl RandomGraph {
    fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            graph: GraphModel::new(),
            next_id: 0,
            next_edge: 0,
        }
    }

    /// Top-level nodes first, then every container's body, so children trail nodes
    /// created after their parent. Edges carry editor-style ids.
    fn build(mut self) -> GraphModel {
        self.graph
            .add_node(node("start", "trigger.manual", "Start"))
            .unwrap();
        let count = self.rng.random_range(3..8);
        let mut top = vec!["start".to_string()];
        for _ in 0..count {
            top.push(self.add(None));
        }

        let mut open: Vec<String> = self.containers(&top);
        let mut scopes = vec![top];
        while let Some(container) = open.pop() {
            let count = if self.next_id < MAX_NODES {
                self.rng.random_range(1..=3)
            } else {
                0
            };
            let mut body = Vec::new();
            for _ in 0..count {
                body.push(self.add(Some(&container)));
            }
            open.extend(self.containers(&body));
            scopes.push(body);
        }

        for scope in &scopes {
            self.link(scope);
        }
        self.graph
    }

    fn add(&mut self, parent: Option<&str>) -> String {
        self.next_id += 1;
        let types = if self.rng.random_bool(0.3) {
            CONTAINERS
        } else {
            LEAVES
        };
        let node_type = *types.choose(&mut self.rng).unwrap();
        let id = format!("n{}", self.next_id);
        let x = self.rng.random_range(0..40) as f64 * 25.0;

        let mut node = node(&id, node_type, &format!("Node {}", self.next_id))
            .with_position(x, self.next_id as f64 * 10.0);
        node = match node_type {
            "logging.log" => node.with_config("message", format!("step {}", self.next_id)),
            "control.set_variable" => node.with_config("name", "counter"),
            "control.loop" => node.with_config("items", "[1, 2, 3]"),
            "control.if" => node.with_config("condition", "true"),
            _ => node,
        };
        if self.rng.random_bool(0.2) {
            node = node.with_description("generated");
        }
        if let Some(parent) = parent {
            node = node.with_parent(parent);
        }
        self.graph.add_node(node).unwrap();
        id
    }

    fn containers(&self, ids: &[String]) -> Vec<String> {
        ids.iter()
            .filter(|id| is_container(&self.graph.node(id).unwrap().node_type))
            .cloned()
            .collect()
    }

    /// Random success/error edges between siblings, self-loops included.
    fn link(&mut self, scope: &[String]) {
        for source in scope {
            for handle in Handle::ALL {
                if !self.rng.random_bool(0.5) {
                    continue;
                }
                let target = scope.choose(&mut self.rng).unwrap().clone();
                self.next_edge += 1;
                let id = format!("edge-{}", self.next_edge);
                self.graph
                    .add_edge(Edge::with_id(&id, source, &target, handle))
                    .unwrap();
            }
        }
    }
}

fn nodes_by_id(graph: &GraphModel) -> Vec<&GraphNode> {
    let mut nodes: Vec<&GraphNode> = graph.nodes().iter().collect();
    nodes.sort_by(|a, b| a.id.cmp(&b.id));
    nodes
}

fn links(graph: &GraphModel) -> Vec<(&str, Handle, &str)> {
    let mut links: Vec<(&str, Handle, &str)> = graph
        .edges()
        .iter()
        .map(|e| (e.source.as_str(), e.source_handle, e.target.as_str()))
        .collect();
    links.sort();
    links
}

#[test]
fn test_random_graphs_round_trip() {
    for seed in 0..16 {
        let graph = RandomGraph::new(seed).build();
        let dsl = compile(&graph, metadata())
            .unwrap_or_else(|errors| panic!("seed {}: {:?}", seed, errors));
        let loaded = load(&dsl).unwrap_or_else(|errors| panic!("seed {}: {:?}", seed, errors));

        assert_eq!(nodes_by_id(&loaded), nodes_by_id(&graph), "seed {}", seed);
        assert_eq!(links(&loaded), links(&graph), "seed {}", seed);
        assert!(loaded.check_structure().is_empty(), "seed {}", seed);

        // Custom edge ids are not kept, the document is
        assert_eq!(compile(&loaded, metadata()).unwrap(), dsl, "seed {}", seed);
    }
}
