//! IR generation domain model

pub mod context;

pub use context::{ExprValue, FlowStep, GenerationContext, PendingPhi};
