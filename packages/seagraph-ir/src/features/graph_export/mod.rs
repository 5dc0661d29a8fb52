//! Graph Export feature - DOT text and petgraph views of finished graphs

pub mod infrastructure;

pub use infrastructure::{EdgeKind, ExportEdge, GraphExporter};
