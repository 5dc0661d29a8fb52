//! IR Generation feature
//!
//! AST → Graph translation with on-the-fly SSA construction.
//!
//! - domain: per-function `GenerationContext`, statement/expression outcomes
//! - ports: `ModuleGenerator`
//! - application: `GenerateIRUseCase`
//! - infrastructure: `IRGenerator`, SSA resolver, errors

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::GenerateIRUseCase;
pub use domain::{ExprValue, FlowStep, GenerationContext};
pub use infrastructure::{GenerationError, GenerationResult, IRGenerator};
pub use ports::ModuleGenerator;
