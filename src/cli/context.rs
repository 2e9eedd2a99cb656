//! Command execution context.
//!
//! One place that loads config, checks the stored credential, and builds the
//! API client, so individual commands stay small.

use std::sync::Arc;

use crate::cache::CachedClient;
use crate::cli::OutputFormat;
use crate::client::RestClient;
use crate::config::Config;
use crate::error::Result;

/// Shared state for one command invocation
pub struct CommandContext {
    /// Loaded and validated configuration
    pub config: Config,
    /// Authenticated API client behind the caching layer
    pub client: Arc<CachedClient<RestClient>>,
    /// Resolved output format
    pub format: OutputFormat,
}

impl CommandContext {
    /// Build a context for an authenticated command.
    ///
    /// Loads config from `config_path` (or the default location), applies the
    /// API host override, and fails early when no credential is stored. The
    /// `--format` flag wins over the configured preference.
    pub fn new(
        format: Option<OutputFormat>,
        api_host_override: Option<&str>,
        config_path: Option<&str>,
        no_cache: bool,
    ) -> Result<Self> {
        let mut config = Config::load_at(config_path)?;
        config.validate_auth()?;

        if let Some(host) = api_host_override {
            config.api_host = Some(host.to_string());
        }

        let raw_client = RestClient::with_host(
            config.token.clone(),
            Some(config.api_host().to_string()),
        )?;
        let client = Arc::new(CachedClient::new(raw_client, !no_cache));

        let format = resolve_format(format, &config);

        Ok(Self {
            config,
            client,
            format,
        })
    }
}

fn resolve_format(flag: Option<OutputFormat>, config: &Config) -> OutputFormat {
    if let Some(format) = flag {
        return format;
    }
    match config.preferences.format.as_deref() {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Table,
    }
}
