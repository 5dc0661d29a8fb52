//! Configuration I/O (YAML schema types)
//!
//! Loading and saving live on `GeneratorConfig`; this module only defines
//! the on-disk shape.

use serde::{Deserialize, Serialize};

use crate::features::ir_graph::DedupStrategy;

pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    #[serde(default)]
    pub version: Option<u32>,

    /// Base preset; `balanced` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,

    /// Fine-grained overrides applied on top of the preset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<ConfigOverrides>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dedup: Option<DedupStrategy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eliminate_trivial_phis: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel_functions: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_nesting_depth: Option<usize>,
}
