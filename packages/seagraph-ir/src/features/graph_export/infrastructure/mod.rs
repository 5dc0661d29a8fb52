pub mod dot_exporter;

pub use dot_exporter::{EdgeKind, ExportEdge, GraphExporter};
