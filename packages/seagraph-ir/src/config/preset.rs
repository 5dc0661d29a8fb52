//! Preset configurations
//!
//! Presets provide complete default generator configurations.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::features::ir_graph::DedupStrategy;

/// Configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Reference behaviour, for diffing against known graph shapes
    ///
    /// - Dedup: linear structural scan
    /// - Trivial phis kept
    /// - Sequential generation
    Reference,

    /// Default
    ///
    /// - Dedup: hashed value numbering
    /// - Trivial phis kept
    /// - Sequential generation
    Balanced,

    /// Large inputs
    ///
    /// - Dedup: hashed value numbering
    /// - Trivial phis collapsed into their single input
    /// - Top-level functions generated in parallel
    Optimizing,
}

impl Preset {
    pub fn dedup_strategy(&self) -> DedupStrategy {
        match self {
            Self::Reference => DedupStrategy::LinearScan,
            Self::Balanced | Self::Optimizing => DedupStrategy::Hashed,
        }
    }

    /// Parse preset from string
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "reference" => Ok(Self::Reference),
            "balanced" => Ok(Self::Balanced),
            "optimizing" => Ok(Self::Optimizing),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reference => "reference",
            Self::Balanced => "balanced",
            Self::Optimizing => "optimizing",
        }
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::Balanced
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
