//! IR graph domain model

pub mod errors;
pub mod graph;
pub mod module;
pub mod node;
pub mod var_proxy;

pub use errors::{GraphError, GraphResult};
pub use graph::{Graph, GraphStats};
pub use module::{FunctionGraph, IRModule};
pub use node::{ControlKind, ControlNode, DataKind, DataNode, Node, NodeId};
pub use var_proxy::{VarBinding, VarProxy};
