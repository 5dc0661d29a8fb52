//! IR Graph - sea-of-nodes intermediate representation
//!
//! Data nodes (values) and control nodes (points in control flow) live in a
//! single append-only graph per function, linked by use-def edges and
//! control edges.
//!
//! ## Architecture
//! - Domain: node type system, Graph, VarProxy, IRModule
//! - Infrastructure: value-numbering index (linear scan or hashed)

pub mod domain;
pub mod infrastructure;

pub use domain::*;
pub use infrastructure::{structurally_equal, DedupStrategy};
