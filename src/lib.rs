//! # botflow - Bot Graph Compiler and Loader
//!
//! **botflow** converts the node graph a visual editor produces into a portable,
//! hierarchical automation document (the bot DSL), and loads such documents back into an
//! editable graph. It also owns the catalog of node types, validates node configuration
//! against each type's schema, and computes which upstream outputs a node may reference
//! through `${Label.field}` expressions.
//!
//! ## Core Workflow
//!
//! 1.  **Build or Convert a Graph**: Assemble a `GraphModel` directly, or implement
//!     `IntoGraph` for your editor's document type (the crate ships one for the canvas
//!     format in [`editor`]).
//! 2.  **Compile**: Use `Compiler::builder` to turn the graph into a `BotDsl`. Every
//!     problem in the graph is reported at once.
//! 3.  **Persist**: `BotDsl` is plain serde; write it as JSON.
//! 4.  **Load**: `Loader` rebuilds the flat graph from a document, rejecting invalid
//!     documents as a whole.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use botflow::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let registry = NodeTemplateRegistry::builtin();
//!
//!     let mut graph = GraphModel::new();
//!     graph.add_node(GraphNode::from_template(
//!         "start",
//!         registry.lookup("trigger.manual")?,
//!         "Start",
//!     ))?;
//!     graph.add_node(
//!         GraphNode::from_template("call", registry.lookup("api.http_request")?, "Call")
//!             .with_config("url", "https://example.com/api"),
//!     )?;
//!     graph.connect("start", "call", Handle::Success)?;
//!
//!     let metadata = BotMetadata::new("bot-1", "Example");
//!     let dsl = match Compiler::builder(&graph, metadata).build().compile() {
//!         Ok(dsl) => dsl,
//!         Err(errors) => {
//!             for error in &errors {
//!                 eprintln!("{}", error);
//!             }
//!             return Ok(());
//!         }
//!     };
//!     println!("{}", dsl.to_json_pretty()?);
//!
//!     // The variables the HTTP node can reference
//!     let resolver = ExpressionResolver::new(registry);
//!     for variable in resolver.available_variables(&graph, "call")? {
//!         println!("{}", variable.expression);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod compiler;
pub mod dsl;
pub mod editor;
pub mod error;
pub mod expression;
pub mod graph;
pub mod loader;
pub mod prelude;
pub mod registry;
pub mod validation;
