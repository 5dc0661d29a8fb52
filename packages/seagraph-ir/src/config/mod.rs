//! Generator configuration
//!
//! Two tiers:
//! - Preset: `GeneratorConfig::preset(Preset::Reference)`
//! - YAML v1 with per-field overrides: `GeneratorConfig::from_yaml("seagraph.yaml")`
//!
//! ```yaml
//! version: 1
//! preset: balanced
//! overrides:
//!   dedup: linear_scan
//!   eliminate_trivial_phis: false
//!   max_nesting_depth: 256
//! ```

pub mod error;
pub mod generator_config;
pub mod io;
pub mod preset;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use generator_config::GeneratorConfig;
pub use io::{ConfigExportV1, ConfigOverrides};
pub use preset::Preset;
pub use validation::Validatable;
