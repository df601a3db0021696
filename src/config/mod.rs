//! Configuration management for the routing client.
//!
//! Provides hierarchical configuration loading and validation with:
//! - Default values as code base
//! - Configuration file support
//! - Environment variable overrides
mod discovery;
pub use discovery::*;


use std::collections::HashMap;
use std::env;
use std::time::Duration;

use config::Config;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use serde::Serialize;

use crate::ConnectionOptions;
use crate::Error;
use crate::Result;

/// Main configuration container for a routing engine
///
/// Combines all settings with hierarchical override support:
/// 1. Default values from code implementation
/// 2. Configuration file specified by `CONFIG_PATH`
/// 3. Environment variables with the `ROUTER__` prefix (highest priority)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RouterConfig {
    /// Name under which discovery tracks the replicated store
    #[serde(default)]
    pub service_name: String,

    /// Discovery service nodes to query
    #[serde(default)]
    pub discovery_addrs: Vec<DiscoveryAddr>,

    /// Socket timeout for master and replica connections in milliseconds.
    /// Unset leaves the store collaborator's own default.
    #[serde(default)]
    pub socket_timeout_in_ms: Option<u64>,

    /// Let store connections retry an operation that hit the socket timeout
    /// Default: true
    #[serde(default = "default_retry_on_timeout")]
    pub retry_on_timeout: bool,

    /// Options forwarded verbatim to the discovery and store collaborators
    #[serde(default)]
    pub options: HashMap<String, String>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            service_name: String::new(),
            discovery_addrs: Vec::new(),
            socket_timeout_in_ms: None,
            retry_on_timeout: default_retry_on_timeout(),
            options: HashMap::new(),
        }
    }
}

impl RouterConfig {
    /// Loads configuration from hierarchical sources without validation.
    ///
    /// Sources are merged in order (later sources override earlier):
    /// 1. Type defaults
    /// 2. Configuration file from `CONFIG_PATH` (if set)
    /// 3. Environment variables with `ROUTER__` prefix
    ///
    /// # Note
    /// Validation is deferred so further overrides can be applied with
    /// [`with_override_config`](Self::with_override_config). Callers must call
    /// [`validate`](Self::validate) before using the configuration.
    ///
    /// # Examples
    /// ```ignore
    /// std::env::set_var("ROUTER__SERVICE_NAME", "cache");
    /// let cfg = RouterConfig::new()?.validate()?;
    /// ```
    pub fn new() -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Ok(config_path) = env::var("CONFIG_PATH") {
            builder = builder.add_source(File::with_name(&config_path).required(true));
        }

        builder = builder.add_source(Self::environment());

        let config: Self = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Applies additional overrides from `path` without validation.
    ///
    /// Merging order: current values, then the file, then environment
    /// variables.
    pub fn with_override_config(
        &self,
        path: &str,
    ) -> Result<Self> {
        let config: Self = Config::builder()
            .add_source(Config::try_from(self)?)
            .add_source(File::with_name(path))
            .add_source(Self::environment())
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    fn environment() -> Environment {
        Environment::with_prefix("ROUTER")
            .separator("__")
            .ignore_empty(true)
            .try_parsing(true)
    }

    /// Validates configuration and returns the validated instance.
    ///
    /// # Errors
    /// - Empty service name
    /// - No discovery addresses, or an address with empty host or port 0
    /// - Socket timeout of zero
    pub fn validate(self) -> Result<Self> {
        self.validate_service_name()?;

        if self.discovery_addrs.is_empty() {
            return Err(Error::Config(ConfigError::Message(
                "at least one discovery address is required".to_string(),
            )));
        }
        for addr in &self.discovery_addrs {
            addr.validate()?;
        }

        self.validate_socket_timeout()?;
        Ok(self)
    }

    pub(crate) fn validate_socket_timeout(&self) -> Result<()> {
        if self.socket_timeout_in_ms == Some(0) {
            return Err(Error::Config(ConfigError::Message(
                "socket_timeout_in_ms must be greater than 0".to_string(),
            )));
        }
        Ok(())
    }

    pub(crate) fn validate_service_name(&self) -> Result<()> {
        if self.service_name.trim().is_empty() {
            return Err(Error::Config(ConfigError::Message(
                "service_name cannot be empty".to_string(),
            )));
        }
        Ok(())
    }

    /// Runtime form of the connection settings
    pub fn connection_options(&self) -> ConnectionOptions {
        ConnectionOptions {
            socket_timeout: self.socket_timeout_in_ms.map(Duration::from_millis),
            retry_on_timeout: self.retry_on_timeout,
            extra: self.options.clone(),
        }
    }
}

fn default_retry_on_timeout() -> bool {
    true
}
