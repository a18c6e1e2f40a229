use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{PxcError, PxcResult};

/// Top-level proxy configuration (loaded from proxy-server.conf)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    pub proxy: ProxyServerConfig,
    pub keymaster: KeymasterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyServerConfig {
    /// Log level (default: info)
    pub log_level: String,
    /// Log format: "json" or "text"
    pub log_format: String,
}

/// The `[keymaster]` section of proxy-server.conf
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeymasterConfig {
    /// Base64 encoding of the deployment's root secret (at least 32 raw
    /// bytes once decoded). Never serialized back out.
    #[serde(skip_serializing)]
    pub encryption_root_secret: Option<SecretString>,
}

// SecretString does not hand out Clone; rebuild from the exposed value.
impl Clone for KeymasterConfig {
    fn clone(&self) -> Self {
        Self {
            encryption_root_secret: self
                .encryption_root_secret
                .as_ref()
                .map(|s| SecretString::from(s.expose_secret().to_string())),
        }
    }
}

impl ProxyConfig {
    /// Read and parse proxy-server.conf from `path`.
    pub fn load(path: &Path) -> PxcResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> PxcResult<Self> {
        toml::from_str(raw).map_err(|e| PxcError::Config(format!("proxy-server.conf parse: {e}")))
    }
}

impl Default for ProxyServerConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            log_format: "json".into(),
        }
    }
}
