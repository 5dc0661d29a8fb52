//! AST - typed, symbol-resolved program model
//!
//! The frontend that produces this model lives outside this crate. IR
//! generation consumes it through the `AstVisitor` dispatch port.
//!
//! - domain: AST node definitions (serde, so programs can be fed as JSON)
//! - ports: `AstVisitor` dispatch contract
//! - infrastructure: `AstBuilder` for hand-built programs

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::*;
pub use infrastructure::{AstBuilder, MAIN_FUNCTION};
pub use ports::AstVisitor;
