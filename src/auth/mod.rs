//! Authentication token storage
//!
//! The platform issues a single opaque token per device. This module owns
//! the one token slot: overwritten on every new login, read on every
//! authenticated request, cleared on logout. The storage backend is a
//! trait so the link flows and tests can inject their own.

#[cfg(test)]
use std::sync::Mutex;

use crate::config::Config;
use crate::error::Result;

/// Injectable storage for the device's authentication token slot
pub trait TokenStore: Send + Sync {
    /// Read the currently stored token, if any
    fn load(&self) -> Result<Option<String>>;

    /// Overwrite the token slot with a new token
    fn save(&self, token: &str) -> Result<()>;

    /// Clear the token slot (logout)
    fn clear(&self) -> Result<()>;
}

/// Token store backed by the config file
pub struct FileTokenStore {
    config_path: Option<String>,
}

impl FileTokenStore {
    pub fn new(config_path: Option<&str>) -> Self {
        Self {
            config_path: config_path.map(str::to_string),
        }
    }

    fn path(&self) -> Option<&str> {
        self.config_path.as_deref()
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        match Config::load_at(self.path()) {
            Ok(config) => Ok(config.token),
            Err(crate::error::Error::Config(crate::error::ConfigError::NotFound)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&self, token: &str) -> Result<()> {
        let mut config = Config::load_at(self.path()).unwrap_or_default();
        config.token = Some(token.to_string());
        config.save_at(self.path())
    }

    fn clear(&self) -> Result<()> {
        let mut config = Config::load_at(self.path()).unwrap_or_default();
        config.token = None;
        config.save_at(self.path())
    }
}

/// In-memory token store for tests
#[cfg(test)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

#[cfg(test)]
impl MemoryTokenStore {
    pub fn new(token: Option<&str>) -> Self {
        Self {
            token: Mutex::new(token.map(str::to_string)),
        }
    }
}

#[cfg(test)]
impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.token.lock().unwrap().clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        *self.token.lock().unwrap() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.token.lock().unwrap() = None;
        Ok(())
    }
}
