use botflow::prelude::*;
use botflow::registry::FieldType;
use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use serde_json::{Value, json};
use std::fs;

/// A CLI tool to generate random, valid editor documents for stressing the compiler
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_graph.json")]
    output: String,

    /// Number of top-level nodes after the trigger
    #[arg(short, long, default_value_t = 20)]
    nodes: usize,

    /// Number of container nodes among them
    #[arg(short, long, default_value_t = 3)]
    containers: usize,

    /// Seed for reproducible output (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,
}

const LEAF_TYPES: &[&str] = &[
    "logging.log",
    "control.wait",
    "control.set_variable",
    "api.http_request",
    "api.parse_json",
    "files.read",
    "files.write",
    "web.navigate",
    "web.click",
    "ai.llm_prompt",
    "email.send",
    "security.get_secret",
];

const CONTAINER_TYPES: &[&str] = &[
    "control.loop",
    "control.if",
    "control.while",
    "control.try_catch",
];

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.containers > cli.nodes {
        eprintln!(
            "Error: --containers ({}) cannot be greater than --nodes ({})",
            cli.containers, cli.nodes
        );
        std::process::exit(1);
    }

    let seed = cli.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    println!(
        "Generating graph with {} node(s), {} container(s) (seed {})...",
        cli.nodes, cli.containers, seed
    );

    let mut generator = Generator::new(NodeTemplateRegistry::builtin(), &mut rng);
    let graph = generator.generate(cli.nodes, cli.containers)?;

    let document = EditorDocument::from_graph(&graph);
    fs::write(&cli.output, document.to_json_pretty()?)?;

    println!(
        "Successfully generated {} node(s) and {} edge(s) to '{}'",
        graph.nodes().len(),
        graph.edges().len(),
        cli.output
    );

    Ok(())
}

struct Generator<'a, R: Rng> {
    registry: &'a NodeTemplateRegistry,
    rng: &'a mut R,
    graph: GraphModel,
    next_id: usize,
}

impl<'a, R: Rng> Generator<'a, R> {
    fn new(registry: &'a NodeTemplateRegistry, rng: &'a mut R) -> Self {
        Self {
            registry,
            rng,
            graph: GraphModel::new(),
            next_id: 0,
        }
    }

    fn generate(&mut self, count: usize, containers: usize) -> Result<GraphModel> {
        let trigger = self.add_node("trigger.manual", None, (0.0, 0.0))?;

        // Spread the containers over random chain positions.
        let mut container_slots: Vec<usize> = (0..count).collect();
        let (picked, _) = container_slots.partial_shuffle(&mut *self.rng, containers);
        let picked = picked.to_vec();

        let mut previous = trigger;
        for slot in 0..count {
            let position = ((slot + 1) as f64 * 250.0, 0.0);
            let id = if picked.contains(&slot) {
                let node_type = pick(&mut *self.rng, CONTAINER_TYPES);
                let container = self.add_node(node_type, None, position)?;
                self.add_children(&container)?;
                container
            } else {
                let node_type = pick(&mut *self.rng, LEAF_TYPES);
                self.add_node(node_type, None, position)?
            };
            self.graph.connect(&previous, &id, Handle::Success)?;

            // Occasionally route failures to a dedicated log node.
            if self.rng.random_bool(0.2) {
                let handler = self.add_node("logging.log", None, (position.0, 200.0))?;
                self.graph.connect(&id, &handler, Handle::Error)?;
            }
            previous = id;
        }

        Ok(std::mem::take(&mut self.graph))
    }

    fn add_children(&mut self, container: &str) -> Result<()> {
        let count = self.rng.random_range(1..=3);
        let mut previous: Option<String> = None;
        for index in 0..count {
            let node_type = pick(&mut *self.rng, LEAF_TYPES);
            let id = self.add_node(node_type, Some(container), (index as f64 * 200.0, 80.0))?;
            if let Some(previous) = &previous {
                self.graph.connect(previous, &id, Handle::Success)?;
            }
            previous = Some(id);
        }
        Ok(())
    }

    fn add_node(
        &mut self,
        node_type: &str,
        parent: Option<&str>,
        (x, y): (f64, f64),
    ) -> Result<String> {
        self.next_id += 1;
        let id = format!("node-{}", self.next_id);
        let template = self.registry.lookup(node_type)?;

        let label = format!("{} {}", template.label, self.next_id);
        let mut node = GraphNode::from_template(&id, template, &label).with_position(x, y);
        for field in template.config_schema.iter().filter(|f| f.required) {
            if !node.config.contains_key(&field.name) {
                node.config
                    .insert(field.name.clone(), sample_value(&field.name, &field.field_type));
            }
        }
        if let Some(parent) = parent {
            node = node.with_parent(parent);
        }

        self.graph.add_node(node)?;
        Ok(id)
    }
}

fn pick<'t, R: Rng>(rng: &mut R, types: &[&'t str]) -> &'t str {
    types.choose(rng).copied().unwrap_or("logging.log")
}

/// A value that satisfies the field's shape check.
fn sample_value(name: &str, field_type: &FieldType) -> Value {
    match field_type {
        FieldType::Number => json!(1),
        FieldType::Boolean => json!(true),
        FieldType::Select { options } => options.first().map_or(json!(""), |o| json!(o)),
        FieldType::FormBuilder => json!([{ "id": "email", "label": "Email", "type": "text" }]),
        FieldType::ValidationBuilder => json!([{ "field": "email", "rule": "required" }]),
        FieldType::Json => json!({}),
        _ => json!(format!("sample {}", name)),
    }
}
