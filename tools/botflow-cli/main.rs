use botflow::compiler::DEFAULT_MAX_DEPTH;
use botflow::dsl::check_document;
use botflow::prelude::*;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Compile editor graphs into bot documents and load them back
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile an editor document into a bot document
    Compile {
        /// Path to the editor JSON file
        editor_path: String,
        /// Where to write the bot document (stdout when omitted)
        #[arg(short, long)]
        out: Option<String>,
        /// Bot name (defaults to the file stem)
        #[arg(long)]
        name: Option<String>,
        /// Bot id
        #[arg(long, default_value = "bot")]
        id: String,
    },
    /// Load a bot document into a flat graph
    Load {
        /// Path to the bot document JSON file
        dsl_path: String,
        /// Where to write the graph (stdout when omitted)
        #[arg(short, long)]
        out: Option<String>,
        /// Emit the editor canvas format instead of the graph model
        #[arg(long)]
        editor: bool,
    },
    /// Check a bot document without loading it
    Check {
        /// Path to the bot document JSON file
        dsl_path: String,
    },
    /// List the expressions a node may reference
    Vars {
        /// Path to the editor JSON file
        editor_path: String,
        /// Id of the node to inspect
        node_id: String,
    },
    /// List the node templates in the built-in registry
    Templates {
        /// Only list templates of this category
        #[arg(short, long)]
        category: Option<String>,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Compile {
            editor_path,
            out,
            name,
            id,
        } => run_compile(&editor_path, out.as_deref(), name, &id),
        Command::Load {
            dsl_path,
            out,
            editor,
        } => run_load(&dsl_path, out.as_deref(), editor),
        Command::Check { dsl_path } => run_check(&dsl_path),
        Command::Vars {
            editor_path,
            node_id,
        } => run_vars(&editor_path, &node_id),
        Command::Templates { category } => run_templates(category.as_deref()),
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "botflow=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run_compile(editor_path: &str, out: Option<&str>, name: Option<String>, id: &str) {
    let start = Instant::now();
    let graph = read_editor_graph(editor_path);

    let name = name.unwrap_or_else(|| {
        Path::new(editor_path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("bot")
            .to_string()
    });
    let dsl = Compiler::builder(&graph, BotMetadata::new(id, &name))
        .build()
        .compile()
        .unwrap_or_else(|errors| {
            report_errors("Compilation failed", &errors);
            std::process::exit(1);
        });

    let json = dsl
        .to_json_pretty()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize document: {}", e)));
    write_output(out, &json);

    eprintln!(
        "Compiled {} node(s) into '{}' ({} top-level) in {:?}",
        graph.nodes().len(),
        dsl.bot.name,
        dsl.nodes.len(),
        start.elapsed()
    );
}

fn run_load(dsl_path: &str, out: Option<&str>, editor: bool) {
    let json = read_file(dsl_path);
    let graph = Loader::new().load_str(&json).unwrap_or_else(|errors| {
        report_errors("Load failed", &errors);
        std::process::exit(1);
    });

    let rendered = match editor {
        true => EditorDocument::from_graph(&graph).to_json_pretty(),
        false => serde_json::to_string_pretty(&graph),
    };
    let rendered = rendered
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize graph: {}", e)));
    write_output(out, &rendered);

    eprintln!(
        "Loaded {} node(s) and {} edge(s)",
        graph.nodes().len(),
        graph.edges().len()
    );
}

fn run_check(dsl_path: &str) {
    let json = read_file(dsl_path);
    let dsl = BotDsl::from_json(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse document: {}", e)));

    let report = check_document(&dsl, NodeTemplateRegistry::builtin(), DEFAULT_MAX_DEPTH);
    for warning in &report.warnings {
        println!("warning: {}", warning);
    }
    if !report.is_ok() {
        report_errors("Check failed", &report.errors);
        std::process::exit(1);
    }
    println!(
        "'{}' is valid ({} node(s), {} warning(s))",
        dsl.bot.name,
        dsl.walk().len(),
        report.warnings.len()
    );
}

fn run_vars(editor_path: &str, node_id: &str) {
    let graph = read_editor_graph(editor_path);
    let resolver = ExpressionResolver::new(NodeTemplateRegistry::builtin());

    let variables = resolver
        .available_variables(&graph, node_id)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    if variables.is_empty() {
        println!("No upstream outputs are visible to '{}'.", node_id);
    }
    for variable in &variables {
        println!(
            "{:<40} {:<8} {}",
            variable.expression, variable.field_type, variable.description
        );
    }

    let unresolved = resolver
        .unresolved_references(&graph, node_id)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    for reference in unresolved {
        println!(
            "unresolved: {} (in '{}')",
            reference.expression, reference.config_key
        );
    }
}

fn run_templates(category: Option<&str>) {
    let registry = NodeTemplateRegistry::builtin();
    let categories = match category {
        Some(raw) => vec![
            raw.parse::<NodeCategory>()
                .unwrap_or_else(|e| exit_with_error(&e)),
        ],
        None => registry.categories(),
    };

    for category in categories {
        println!("[{}]", category);
        for template in registry.by_category(category) {
            let marker = if is_container(&template.node_type) {
                " (container)"
            } else {
                ""
            };
            println!(
                "  {:<28} {}{}",
                template.node_type, template.label, marker
            );
        }
    }
}

fn read_file(path: &str) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read '{}': {}", path, e)))
}

fn read_editor_graph(path: &str) -> GraphModel {
    let json = read_file(path);
    let document = EditorDocument::from_json(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse editor JSON: {}", e)));
    document
        .into_graph(NodeTemplateRegistry::builtin())
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to convert editor document: {}", e)))
}

fn write_output(out: Option<&str>, contents: &str) {
    match out {
        Some(path) => fs::write(path, contents)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to write '{}': {}", path, e))),
        None => println!("{}", contents),
    }
}

fn report_errors<E: std::fmt::Display>(heading: &str, errors: &[E]) {
    eprintln!("\n{}: {} error(s)", heading, errors.len());
    for error in errors {
        eprintln!("  - {}", error);
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
