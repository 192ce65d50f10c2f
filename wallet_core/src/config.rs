//! Wallet configuration with TOML file support.

use serde::{Deserialize, Serialize};
use stels_crypto::AddressFormat;
use std::path::Path;
use std::time::Duration;

use crate::error::WalletError;

/// Configuration for a STELS wallet.
///
/// Can be loaded from a TOML file via [`WalletConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). The session token is never part
/// of the file; it is passed per submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Node API endpoint that receives `submitAssetTransaction` calls.
    #[serde(default = "default_node_url")]
    pub node_url: String,

    /// Whole-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// TCP connect timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Address scheme recipients are checked against.
    #[serde(default)]
    pub address_format: AddressFormat,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_node_url() -> String {
    "http://127.0.0.1:8088/api".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl WalletConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, WalletError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| WalletError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, WalletError> {
        toml::from_str(s).map_err(|e| WalletError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, WalletError> {
        toml::to_string_pretty(self).map_err(|e| WalletError::Config(e.to_string()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            node_url: default_node_url(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            address_format: AddressFormat::default(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = WalletConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        let parsed = WalletConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = WalletConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.node_url, "http://127.0.0.1:8088/api");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.address_format, AddressFormat::Basic);
        assert_eq!(config.log_format, "human");
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            node_url = "https://node.example/api"
            address_format = "checksummed"
            request_timeout_secs = 5
        "#;
        let config = WalletConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.node_url, "https://node.example/api");
        assert_eq!(config.address_format, AddressFormat::Checksummed);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn unknown_address_format_rejected() {
        let err = WalletConfig::from_toml_str("address_format = \"bech32\"").unwrap_err();
        assert!(matches!(err, WalletError::Config(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wallet.toml");
        std::fs::write(&path, "log_level = \"debug\"\n").unwrap();
        let config = WalletConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = WalletConfig::from_toml_file(Path::new("/nonexistent/stels/wallet.toml"))
            .unwrap_err();
        assert!(matches!(err, WalletError::Config(_)));
    }
}
