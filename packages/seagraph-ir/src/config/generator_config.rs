//! IR generator configuration
//!
//! ```rust,ignore
//! use seagraph_ir::config::{GeneratorConfig, Preset};
//!
//! let config = GeneratorConfig::preset(Preset::Reference)
//!     .max_nesting_depth(128)
//!     .validated()?;
//! let config = GeneratorConfig::from_yaml("seagraph.yaml")?;
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, ConfigResult};
use super::io::{ConfigExportV1, ConfigOverrides, SUPPORTED_VERSIONS};
use super::preset::Preset;
use super::validation::Validatable;
use crate::features::ir_graph::DedupStrategy;

const MAX_NESTING_LIMIT: usize = 4096;

fn default_max_nesting_depth() -> usize {
    512
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Preset the remaining fields started from
    pub preset: Preset,

    /// Value-numbering strategy for data nodes
    pub dedup: DedupStrategy,

    /// Collapse a merge phi whose inputs are all the same node into that node
    pub eliminate_trivial_phis: bool,

    /// Generate top-level functions on the rayon pool
    pub parallel_functions: bool,

    /// Statement/expression nesting limit (1..=4096)
    #[serde(default = "default_max_nesting_depth")]
    pub max_nesting_depth: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::preset(Preset::default())
    }
}

impl GeneratorConfig {
    pub fn preset(preset: Preset) -> Self {
        Self {
            preset,
            dedup: preset.dedup_strategy(),
            eliminate_trivial_phis: matches!(preset, Preset::Optimizing),
            parallel_functions: matches!(preset, Preset::Optimizing) && cfg!(feature = "parallel"),
            max_nesting_depth: default_max_nesting_depth(),
        }
    }

    pub fn dedup(mut self, strategy: DedupStrategy) -> Self {
        self.dedup = strategy;
        self
    }

    pub fn eliminate_trivial_phis(mut self, enabled: bool) -> Self {
        self.eliminate_trivial_phis = enabled;
        self
    }

    pub fn parallel_functions(mut self, enabled: bool) -> Self {
        self.parallel_functions = enabled;
        self
    }

    pub fn max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// Validate and return self
    pub fn validated(self) -> ConfigResult<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Load YAML schema v1 from a file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        let version = export.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let preset = match export.preset.as_deref() {
            Some(name) => Preset::from_str(name)?,
            None => Preset::default(),
        };

        let mut config = Self::preset(preset);
        if let Some(overrides) = export.overrides {
            config.apply(overrides);
        }
        config.validated()
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: Some(1),
            preset: Some(self.preset.to_string()),
            overrides: Some(ConfigOverrides {
                dedup: Some(self.dedup),
                eliminate_trivial_phis: Some(self.eliminate_trivial_phis),
                parallel_functions: Some(self.parallel_functions),
                max_nesting_depth: Some(self.max_nesting_depth),
            }),
        };
        Ok(serde_yaml::to_string(&export)?)
    }

    fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(dedup) = overrides.dedup {
            self.dedup = dedup;
        }
        if let Some(enabled) = overrides.eliminate_trivial_phis {
            self.eliminate_trivial_phis = enabled;
        }
        if let Some(enabled) = overrides.parallel_functions {
            self.parallel_functions = enabled;
        }
        if let Some(depth) = overrides.max_nesting_depth {
            self.max_nesting_depth = depth;
        }
    }

    /// One-line summary for logs
    pub fn describe(&self) -> String {
        format!(
            "preset={} dedup={} trivial_phis={} parallel={} max_depth={}",
            self.preset,
            self.dedup.as_str(),
            if self.eliminate_trivial_phis {
                "eliminated"
            } else {
                "kept"
            },
            self.parallel_functions,
            self.max_nesting_depth
        )
    }
}

impl Validatable for GeneratorConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_nesting_depth == 0 || self.max_nesting_depth > MAX_NESTING_LIMIT {
            return Err(ConfigError::range_with_hint(
                "max_nesting_depth",
                self.max_nesting_depth,
                1,
                MAX_NESTING_LIMIT,
                "Deeper nesting risks exhausting the stack during generation",
            ));
        }
        if self.parallel_functions && !cfg!(feature = "parallel") {
            return Err(ConfigError::FeatureDisabled {
                setting: "parallel_functions".to_string(),
                feature: "parallel".to_string(),
            });
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "GeneratorConfig"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let reference = GeneratorConfig::preset(Preset::Reference);
        assert_eq!(reference.dedup, DedupStrategy::LinearScan);
        assert!(!reference.eliminate_trivial_phis);
        assert!(!reference.parallel_functions);

        let balanced = GeneratorConfig::default();
        assert_eq!(balanced.preset, Preset::Balanced);
        assert_eq!(balanced.dedup, DedupStrategy::Hashed);
        assert!(!balanced.eliminate_trivial_phis);

        assert!(GeneratorConfig::preset(Preset::Optimizing).eliminate_trivial_phis);
    }

    #[test]
    fn test_builder_overrides() {
        let config = GeneratorConfig::preset(Preset::Balanced)
            .dedup(DedupStrategy::LinearScan)
            .eliminate_trivial_phis(true)
            .max_nesting_depth(64);
        assert_eq!(config.dedup, DedupStrategy::LinearScan);
        assert!(config.eliminate_trivial_phis);
        assert_eq!(config.max_nesting_depth, 64);
        assert!(config.validated().is_ok());
    }

    #[test]
    fn test_nesting_depth_range() {
        assert!(GeneratorConfig::default().max_nesting_depth(0).validate().is_err());
        assert!(GeneratorConfig::default()
            .max_nesting_depth(MAX_NESTING_LIMIT + 1)
            .validate()
            .is_err());
        assert!(GeneratorConfig::default()
            .max_nesting_depth(MAX_NESTING_LIMIT)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_yaml_overrides_apply_on_top_of_preset() {
        let config = GeneratorConfig::from_yaml_str(
            r#"
version: 1
preset: reference
overrides:
  eliminate_trivial_phis: true
  max_nesting_depth: 32
"#,
        )
        .unwrap();
        assert_eq!(config.preset, Preset::Reference);
        assert_eq!(config.dedup, DedupStrategy::LinearScan);
        assert!(config.eliminate_trivial_phis);
        assert_eq!(config.max_nesting_depth, 32);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = GeneratorConfig::preset(Preset::Reference).max_nesting_depth(99);
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("version: 1"));
        assert!(yaml.contains("preset: reference"));
        assert!(yaml.contains("dedup: linear_scan"));
        assert_eq!(GeneratorConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_yaml_version_checks() {
        assert!(matches!(
            GeneratorConfig::from_yaml_str("preset: balanced\n"),
            Err(ConfigError::MissingVersion)
        ));
        assert!(matches!(
            GeneratorConfig::from_yaml_str("version: 2\n"),
            Err(ConfigError::UnsupportedVersion { found: 2, .. })
        ));
        assert!(matches!(
            GeneratorConfig::from_yaml_str("version: 1\npreset: turbo\n"),
            Err(ConfigError::UnknownPreset(_))
        ));
    }

    #[test]
    fn test_yaml_rejects_unknown_fields() {
        let result = GeneratorConfig::from_yaml_str(
            "version: 1\noverrides:\n  dedupe: hashed\n",
        );
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_describe() {
        let text = GeneratorConfig::preset(Preset::Reference).describe();
        assert!(text.contains("preset=reference"));
        assert!(text.contains("dedup=linear_scan"));
        assert!(text.contains("trivial_phis=kept"));
    }
}
