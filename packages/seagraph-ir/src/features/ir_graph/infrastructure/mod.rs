//! IR graph infrastructure

pub mod dedup;

pub use dedup::{structurally_equal, DedupIndex, DedupStrategy};
