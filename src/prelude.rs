//! Prelude module for convenient imports
//!
//! Re-exports the types most programs need to build, compile and load bot graphs.
//!
//! # Example
//!
//! ```rust,no_run
//! use botflow::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let json = std::fs::read_to_string("path/to/bot.json")?;
//! let graph = Loader::new()
//!     .load_str(&json)
//!     .map_err(|errors| format!("{} load error(s)", errors.len()))?;
//!
//! let dsl = compile(&graph, BotMetadata::new("bot-1", "Reloaded"))
//!     .map_err(|errors| format!("{} compile error(s)", errors.len()))?;
//! println!("{}", dsl.to_json_pretty()?);
//! # Ok(())
//! # }
//! ```

// Compilation and loading
pub use crate::compiler::{Compiler, CompilerBuilder, compile};
pub use crate::loader::{Loader, load};

// Document model
pub use crate::dsl::{BotDsl, BotMetadata, DslNode, NodeOutputs, Target, VariableDefinition};

// Graph model
pub use crate::editor::EditorDocument;
pub use crate::graph::{Edge, GraphModel, GraphNode, Handle, IntoGraph, Position, RemovalPolicy};

// Templates and validation
pub use crate::registry::{
    ContainerKind, NodeCategory, NodeTemplate, NodeTemplateRegistry, is_container,
};
pub use crate::validation::{ConfigValidator, ValidationResult};

// Expressions
pub use crate::expression::{AvailableVariable, ExpressionResolver};

// Error types
pub use crate::error::{
    CompileError, ConversionError, GraphError, LoadError, RegistryError, ResolveError,
};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
