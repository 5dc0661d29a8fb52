//! SSA-versioned variable bindings

use serde::Serialize;
use std::fmt;

use super::node::NodeId;
use crate::shared::models::SymbolId;

/// One definition of a source variable: `(symbol, version)`
///
/// Versions count up per symbol in definition order. A proxy is bound to
/// exactly one data node when it is created and never rebound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct VarProxy {
    pub sym: SymbolId,
    pub version: u32,
}

impl fmt::Display for VarProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_v{}", self.sym, self.version)
    }
}

/// Entry of the graph-global, append-only definition table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VarBinding {
    pub proxy: VarProxy,
    pub node: NodeId,
}
