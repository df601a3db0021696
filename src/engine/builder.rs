use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use super::RoutingEngine;
use crate::ConnectionOptions;
use crate::Discovery;
use crate::DiscoveryAddr;
use crate::DiscoveryError;
use crate::Result;
use crate::RouterConfig;

/// Configurable builder for [`RoutingEngine`] instances
///
/// # Typical Usage Flow
/// 1. Create with `RouterBuilder::new()` or [`RoutingEngine::builder`]
/// 2. Chain configuration methods
/// 3. Finalize with [`build`](RouterBuilder::build) or
///    [`connect`](RouterBuilder::connect)
///
/// # Default Configuration
/// - Socket timeout: collaborator default
/// - Retry on timeout: enabled
pub struct RouterBuilder {
    config: RouterConfig,
}

impl RouterBuilder {
    /// Create a new builder with default config for `service_name`
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            config: RouterConfig {
                service_name: service_name.into(),
                ..RouterConfig::default()
            },
        }
    }

    /// Add a discovery service node
    pub fn discovery_addr(
        mut self,
        addr: impl Into<DiscoveryAddr>,
    ) -> Self {
        self.config.discovery_addrs.push(addr.into());
        self
    }

    /// Set socket timeout for master and replica connections
    ///
    /// Stored in whole milliseconds. A non-zero timeout under 1ms is rounded
    /// up to 1ms; a zero timeout is rejected when the engine is built.
    pub fn socket_timeout(
        mut self,
        timeout: Duration,
    ) -> Self {
        let mut millis = timeout.as_millis() as u64;
        if millis == 0 && !timeout.is_zero() {
            millis = 1;
        }
        self.config.socket_timeout_in_ms = Some(millis);
        self
    }

    /// Enable/disable store-level retry on socket timeout (default: enabled)
    pub fn retry_on_timeout(
        mut self,
        enable: bool,
    ) -> Self {
        self.config.retry_on_timeout = enable;
        self
    }

    /// Add an option forwarded verbatim to the collaborators
    pub fn option(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.config.options.insert(key.into(), value.into());
        self
    }

    /// Completely replaces the current configuration
    ///
    /// # Warning: Configuration Override
    /// Discards everything set through the granular methods, including the
    /// service name passed to [`new`](RouterBuilder::new).
    ///
    /// # Example
    /// ```no_run
    /// use replica_router::RouterBuilder;
    /// use replica_router::RouterConfig;
    ///
    /// let config = RouterConfig::new().unwrap().validate().unwrap();
    /// let builder = RouterBuilder::new("ignored").set_config(config);
    /// ```
    pub fn set_config(
        mut self,
        config: RouterConfig,
    ) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Build the engine against an already connected discovery service
    ///
    /// The service name and socket timeout are validated; discovery
    /// addresses are the caller's concern on this path.
    pub async fn build(
        self,
        discovery: Arc<dyn Discovery>,
    ) -> Result<RoutingEngine> {
        self.config.validate_service_name()?;
        self.config.validate_socket_timeout()?;
        let options = self.config.connection_options();
        RoutingEngine::connect(self.config.service_name, discovery, options).await
    }

    /// Validate the full configuration, hand the discovery addresses and
    /// connection options to `connector`, then build the engine
    pub async fn connect<F>(
        self,
        connector: F,
    ) -> Result<RoutingEngine>
    where
        F: FnOnce(&[DiscoveryAddr], &ConnectionOptions) -> std::result::Result<Arc<dyn Discovery>, DiscoveryError>,
    {
        let config = self.config.validate()?;
        let options = config.connection_options();

        info!(
            "replica-router {} connecting to service {} through discovery {:?}",
            crate::VERSION,
            config.service_name,
            config.discovery_addrs
        );
        let discovery = connector(&config.discovery_addrs, &options)?;

        RoutingEngine::connect(config.service_name, discovery, options).await
    }
}
