//! IR generation infrastructure
//!
//! - generator: `AstVisitor` implementation building one Graph per function
//! - ssa_resolver: variable reads/writes, phi insertion, loop sealing
//! - errors: `GenerationError`

pub mod errors;
pub mod generator;
pub mod ssa_resolver;

pub use errors::{GenerationError, GenerationResult};
pub use generator::IRGenerator;
