//! Shared models used across features
//!
//! - span: source locations
//! - symbol: resolved variable/function symbols
//! - types: static types and literal values
//! - op: operator enumeration

pub mod op;
pub mod span;
pub mod symbol;
pub mod types;

pub use op::Op;
pub use span::Span;
pub use symbol::{FunctionSymbol, SymbolId, VarSymbol};
pub use types::{ConstValue, StaticType};
