//! Plugin Configuration
//!
//! Two recognized options, namespaced under `intel.smartmon` at the host
//! boundary: the path to the smartctl executable and whether to elevate the
//! probe through sudo. [`ConfigPolicy`] is the declarative form handed to
//! the host framework; [`PluginConfig`] is the resolved runtime view used
//! by the collection cycle.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Resolved plugin configuration for one collection cycle.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PluginConfig {
    /// Path to the smartctl executable.
    #[serde(default = "default_smartctl_path")]
    pub smartctl_path: String,
    /// Run the probe under `sudo -n`.
    #[serde(default)]
    pub sudo: bool,
}

fn default_smartctl_path() -> String {
    "smartctl".to_string()
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            smartctl_path: default_smartctl_path(),
            sudo: false,
        }
    }
}

impl PluginConfig {
    /// Load configuration from an optional file layered with `SMARTMON`
    /// environment variables.
    pub fn load(path: &str) -> Result<Self> {
        // Load environment variables from .env if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("SMARTMON").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

/// Value type of a configuration option the host may supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    String,
    Bool,
}

/// One recognized configuration option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigRule {
    pub key: String,
    pub kind: RuleKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// Declarative configuration policy handed to the host framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigPolicy {
    /// Option namespace the rules live under.
    pub namespace: Vec<String>,
    pub rules: Vec<ConfigRule>,
}

impl ConfigPolicy {
    /// The options this plugin recognizes: `smartctl_path` (string,
    /// required, defaults to `smartctl`) and `sudo` (bool, required, no
    /// default — the caller must decide).
    pub fn declare() -> Self {
        ConfigPolicy {
            namespace: vec!["intel".to_string(), "smartmon".to_string()],
            rules: vec![
                ConfigRule {
                    key: "smartctl_path".to_string(),
                    kind: RuleKind::String,
                    required: true,
                    default: Some(default_smartctl_path()),
                },
                ConfigRule {
                    key: "sudo".to_string(),
                    kind: RuleKind::Bool,
                    required: true,
                    default: None,
                },
            ],
        }
    }
}
