//! Configuration schema definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SitewrightConfig {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub timeouts: TimeoutConfig,

    #[serde(default)]
    pub discovery: DiscoveryConfig,

    #[serde(default)]
    pub vault: VaultConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Remote browser-automation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Base URL of the automation service.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API key sent with every request. Usually supplied via `${VAR}`
    /// expansion so the key stays out of the config file.
    #[serde(default)]
    pub api_key: String,

    /// Model the service should use for act/extract/agent operations.
    #[serde(default = "default_model")]
    pub model: String,
}

/// Bounded waits used by the authentication flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// How long to wait for an active page before failing.
    #[serde(default = "default_page_wait")]
    pub page_wait_secs: u64,

    /// Network-idle wait after automated clicks/autofill. Non-fatal on
    /// expiry; the flow re-inspects regardless.
    #[serde(default = "default_network_idle")]
    pub network_idle_secs: u64,
}

/// Action-discovery tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Upper bound on autonomous browser interactions per exploration run.
    #[serde(default = "default_step_budget")]
    pub agent_step_budget: u32,
}

/// Credential-vault integration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Whether to consult the vault at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Vault CLI binary to shell out to.
    #[serde(default = "default_vault_cli")]
    pub cli_path: String,
}

/// Generated-output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the synthesized server package is written into.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

fn default_endpoint() -> String {
    "https://api.sitewright.dev".to_string()
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_page_wait() -> u64 {
    10
}

fn default_network_idle() -> u64 {
    5
}

fn default_step_budget() -> u32 {
    40
}

fn default_true() -> bool {
    true
}

fn default_vault_cli() -> String {
    "op".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("generated")
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: String::new(),
            model: default_model(),
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            page_wait_secs: default_page_wait(),
            network_idle_secs: default_network_idle(),
        }
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            agent_step_budget: default_step_budget(),
        }
    }
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            cli_path: default_vault_cli(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

impl SitewrightConfig {
    /// Check the values the workflow depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if url::Url::parse(&self.browser.endpoint).is_err() {
            return Err(ConfigError::InvalidValue {
                field: "browser.endpoint".to_string(),
                message: "must be an absolute URL".to_string(),
            });
        }
        if self.timeouts.page_wait_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeouts.page_wait_secs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.discovery.agent_step_budget == 0 {
            return Err(ConfigError::InvalidValue {
                field: "discovery.agent_step_budget".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
