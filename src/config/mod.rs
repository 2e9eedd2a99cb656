//! Configuration management for the SupplyMind CLI

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Default REST API host
pub const DEFAULT_API_HOST: &str = "https://api.supplymind.io";

/// Default broker-over-WebSocket host for the login handshake
pub const DEFAULT_WS_HOST: &str = "wss://realtime.supplymind.io/ws";

/// Application configuration
///
/// Holds the single authentication-token slot: overwritten on every new
/// login, read on every authenticated request, cleared on logout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Authentication token issued by the platform
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// REST API host override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,

    /// Realtime (WebSocket) host override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_host: Option<String>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Default currency for payment intents (ISO 4217, lowercase)
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "usd".to_string()
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            format: None,
            currency: default_currency(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".supplymind").join("config.yaml"))
    }

    /// Resolve the config path from an optional override
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an optional path override, or the default path
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(Self::resolve_path(path)?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to an optional path override, or the default path
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(Self::resolve_path(path)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // Token lives in this file; keep it private on unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Resolved API host (override or default)
    pub fn api_host(&self) -> &str {
        self.api_host.as_deref().unwrap_or(DEFAULT_API_HOST)
    }

    /// Resolved realtime host (override or default)
    pub fn ws_host(&self) -> &str {
        self.ws_host.as_deref().unwrap_or(DEFAULT_WS_HOST)
    }

    /// Validate that an authentication token is present
    pub fn validate_auth(&self) -> Result<()> {
        if self.token.is_none() {
            return Err(ConfigError::MissingToken.into());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: None,
            api_host: None,
            ws_host: None,
            preferences: Preferences::default(),
        }
    }
}
