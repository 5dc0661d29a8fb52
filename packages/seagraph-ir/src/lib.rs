/*
 * Seagraph IR - sea-of-nodes SSA construction
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (Span, symbols, types, operators)
 * - features/    : ast → ir_graph → ir_generation → graph_export
 * - config/      : Generator presets, YAML schema, validation
 *
 * A typed, symbol-resolved AST is lowered into one graph per function in
 * which data nodes and control nodes share a single index space. Phis are
 * inserted on demand while variable reads are resolved.
 */

#![allow(clippy::should_implement_trait)] // from_str naming intentional
#![allow(clippy::upper_case_acronyms)] // IR, SSA naming
#![allow(clippy::module_inception)] // Module naming intentional

pub mod config;
pub mod errors;
pub mod features;
pub mod shared;

pub use config::{GeneratorConfig, Preset};
pub use errors::{Result, SeagraphError};
pub use features::ast::{AstBuilder, Program};
pub use features::graph_export::GraphExporter;
pub use features::ir_generation::{GenerationError, IRGenerator};
pub use features::ir_graph::{DedupStrategy, Graph, IRModule, NodeId};

/// Generate the IR module for `program` with `config`
pub fn generate(program: &Program, config: GeneratorConfig) -> Result<IRModule> {
    Ok(IRGenerator::new(config).generate_program(program)?)
}
