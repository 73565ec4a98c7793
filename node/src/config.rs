//! Engine configuration with TOML file support.

use serde::{Deserialize, Serialize};

use meridian_types::ChainParams;

use crate::EngineError;

/// Configuration for the block engine.
///
/// Can be loaded from a TOML file via [`EngineConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Protocol scheduling parameters
/// default to the network constants and are only overridden on private
/// deployments.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Block cadence parameters.
    #[serde(default)]
    pub params: ChainParams,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, EngineError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| EngineError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, EngineError> {
        toml::from_str(s).map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("EngineConfig is always serializable to TOML")
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            params: ChainParams::default(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}
