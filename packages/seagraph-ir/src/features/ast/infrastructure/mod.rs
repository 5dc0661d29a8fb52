//! AST construction helpers

pub mod builder;

pub use builder::{AstBuilder, MAIN_FUNCTION};
