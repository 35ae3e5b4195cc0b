//! Configuration model.
//!
//! Veil reads a single TOML file:
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:8378"
//! application_id = "test"
//! master_key = "test"
//!
//! [users]
//! sensitive_fields = ["ssn", "zip"]
//!
//! [logging]
//! filter = "info,veil=debug"
//! ```
//!
//! Resolution order for the file: explicit path, then `$VEIL_CONFIG`, then
//! built-in defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "VEIL_CONFIG";

/// Sensitive user fields when none are configured.
pub const DEFAULT_SENSITIVE_FIELDS: &[&str] = &["email"];

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VeilConfig {
    /// HTTP server and credential settings.
    pub server: ServerConfig,
    /// User-class settings.
    pub users: UsersConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP server and credential settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: String,
    /// Application ID every request must present.
    pub application_id: String,
    /// Master key; when unset no request can claim master-key trust.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8378".to_string(),
            application_id: "veil".to_string(),
            master_key: None,
        }
    }
}

/// User-class settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsersConfig {
    /// Replaces the default sensitive field set when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensitive_fields: Option<Vec<String>>,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` env-filter directive. `RUST_LOG` takes precedence.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl VeilConfig {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, `$VEIL_CONFIG` is tried,
    /// and without that the defaults are returned.
    pub fn load(path: Option<&str>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.is_empty() => Self::from_file(&path),
            _ => {
                log::debug!("No config file given; using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::config(format!(
                "Config file does not exist: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Render the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Resolved sensitive user fields.
    ///
    /// A configured list replaces the default rather than extending it.
    /// Duplicates are dropped, first occurrence wins.
    pub fn sensitive_fields(&self) -> Vec<String> {
        let configured: Vec<String> = match &self.users.sensitive_fields {
            Some(fields) => fields.clone(),
            None => DEFAULT_SENSITIVE_FIELDS
                .iter()
                .map(|f| (*f).to_string())
                .collect(),
        };
        let mut resolved: Vec<String> = Vec::with_capacity(configured.len());
        for field in configured {
            if !resolved.contains(&field) {
                resolved.push(field);
            }
        }
        resolved
    }
}
