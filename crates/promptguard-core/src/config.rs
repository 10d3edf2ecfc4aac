//! Configuration tree for the prompt defense pipeline.
//!
//! Mirrors the shape of the original source's `AdvancedPromptDefenseConfig`/
//! `DetectorConfig` dataclasses as a typed record, loaded from a JSON
//! document nested under an `advanced_prompt_defense` key.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use promptguard_detectors::{DetectorSettings, Sensitivity};

/// Detector names recognized by the pipeline, in their canonical dispatch
/// order (also the fusion tie-break order).
pub const DETECTOR_NAMES: [&str; 8] = [
    "overt_injection",
    "covert_injection",
    "scope_validator",
    "data_egress",
    "protocol_tampering",
    "context_attack",
    "multilingual_attack",
    "business_logic_protector",
];

/// Per-detector configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    pub enabled: bool,
    pub sensitivity: Sensitivity,
    pub confidence_threshold: f64,
    #[serde(default)]
    pub custom_settings: serde_json::Value,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sensitivity: Sensitivity::Medium,
            confidence_threshold: 0.5,
            custom_settings: serde_json::Value::Null,
        }
    }
}

impl From<&DetectorConfig> for DetectorSettings {
    fn from(config: &DetectorConfig) -> Self {
        DetectorSettings {
            enabled: config.enabled,
            sensitivity: config.sensitivity,
            confidence_threshold: config.confidence_threshold,
            custom_settings: config.custom_settings.clone(),
        }
    }
}

/// Global pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    pub enabled: bool,
    pub block_threshold: f64,
    pub flag_threshold: f64,
    pub max_validation_time_ms: u64,
    pub cache_size: usize,
    pub cache_ttl_seconds: u64,
    pub cache_optimization_interval: u64,
    pub parallel_detection: bool,
    pub max_workers: usize,
    pub max_memory_mb: usize,
    pub monitoring_enabled: bool,
    pub user_guidance_enabled: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            block_threshold: 0.9,
            flag_threshold: 0.5,
            max_validation_time_ms: 200,
            cache_size: 1024,
            cache_ttl_seconds: 300,
            cache_optimization_interval: 100,
            parallel_detection: true,
            max_workers: 8,
            max_memory_mb: 256,
            monitoring_enabled: true,
            user_guidance_enabled: true,
        }
    }
}

/// The full configuration tree, versioned so readers can detect staleness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptDefenseConfig {
    pub global: GlobalConfig,
    pub detectors: HashMap<String, DetectorConfig>,
    #[serde(default)]
    pub config_version: u64,
}

impl Default for PromptDefenseConfig {
    fn default() -> Self {
        let detectors = DETECTOR_NAMES.iter().map(|&name| (name.to_string(), DetectorConfig::default())).collect();
        Self { global: GlobalConfig::default(), detectors, config_version: 0 }
    }
}

/// The on-disk document shape: configuration nested under one key so the
/// same file format can carry other top-level sections in the future.
#[derive(Debug, Serialize, Deserialize)]
struct ConfigDocument {
    advanced_prompt_defense: PromptDefenseConfig,
}

impl PromptDefenseConfig {
    /// Load configuration from `path`, falling back to defaults with a WARN
    /// if the file is absent or unreadable.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<ConfigDocument>(&contents) {
                Ok(doc) => doc.advanced_prompt_defense,
                Err(e) => {
                    warn!("failed to parse config at {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                warn!("no config file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Serialize and write this configuration to `path`.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let doc = ConfigDocument { advanced_prompt_defense: self.clone() };
        let contents = serde_json::to_string_pretty(&doc)?;
        std::fs::write(path, contents)
    }

    pub fn get_detector_config(&self, name: &str) -> Option<&DetectorConfig> {
        self.detectors.get(name)
    }

    pub fn is_detector_enabled(&self, name: &str) -> bool {
        self.global.enabled && self.detectors.get(name).map(|d| d.enabled).unwrap_or(false)
    }

    /// Validate this configuration, returning a list of human-readable
    /// issues. An empty list means the configuration is sound.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !(0.0..=1.0).contains(&self.global.block_threshold) {
            issues.push(format!("global.block_threshold {} out of range [0,1]", self.global.block_threshold));
        }
        if !(0.0..=1.0).contains(&self.global.flag_threshold) {
            issues.push(format!("global.flag_threshold {} out of range [0,1]", self.global.flag_threshold));
        }
        if self.global.flag_threshold >= self.global.block_threshold {
            issues.push(format!(
                "global.flag_threshold ({}) must be less than global.block_threshold ({})",
                self.global.flag_threshold, self.global.block_threshold
            ));
        }
        if self.global.max_validation_time_ms == 0 {
            issues.push("global.max_validation_time_ms must be positive".to_string());
        }
        if self.global.cache_size == 0 {
            issues.push("global.cache_size must be positive".to_string());
        }
        if self.global.max_workers == 0 {
            issues.push("global.max_workers must be positive".to_string());
        }
        if self.global.max_memory_mb == 0 {
            issues.push("global.max_memory_mb must be positive".to_string());
        }

        for name in self.detectors.keys() {
            if !DETECTOR_NAMES.contains(&name.as_str()) {
                issues.push(format!("unknown detector name in configuration: {}", name));
            }
        }
        for (name, detector) in &self.detectors {
            if !(0.0..=1.0).contains(&detector.confidence_threshold) {
                issues.push(format!("detectors.{}.confidence_threshold {} out of range [0,1]", name, detector.confidence_threshold));
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(PromptDefenseConfig::default().validate().is_empty());
    }

    #[test]
    fn flag_threshold_must_be_below_block_threshold() {
        let mut config = PromptDefenseConfig::default();
        config.global.flag_threshold = 0.95;
        config.global.block_threshold = 0.9;
        let issues = config.validate();
        assert!(issues.iter().any(|i| i.contains("flag_threshold")));
    }

    #[test]
    fn unknown_detector_name_is_rejected() {
        let mut config = PromptDefenseConfig::default();
        config.detectors.insert("made_up_detector".to_string(), DetectorConfig::default());
        let issues = config.validate();
        assert!(issues.iter().any(|i| i.contains("made_up_detector")));
    }

    #[test]
    fn load_falls_back_to_default_when_file_absent() {
        let config = PromptDefenseConfig::load(Path::new("/nonexistent/path/config.json"));
        assert!(config.validate().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut config = PromptDefenseConfig::default();
        config.config_version = 3;
        config.save(&path).unwrap();
        let loaded = PromptDefenseConfig::load(&path);
        assert_eq!(loaded.config_version, 3);
    }
}
