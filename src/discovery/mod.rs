//! Topology discovery
//!
//! The discovery service (election, replica health) is an external
//! collaborator reached through the [`Discovery`] trait. [`EndpointResolver`]
//! wraps it and produces fresh master and replica handles on demand.

mod resolver;

pub use resolver::*;


use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

use async_trait::async_trait;

use crate::DiscoveryError;
use crate::StoreEndpoint;

/// Role a store node plays in the replicated topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Master,
    Replica,
}

impl fmt::Display for Role {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Role::Master => write!(f, "master"),
            Role::Replica => write!(f, "replica"),
        }
    }
}

/// Connection settings forwarded to discovery on every resolution
///
/// Applied identically to master and replica connections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionOptions {
    /// Socket timeout for store calls; `None` leaves the collaborator default
    pub socket_timeout: Option<Duration>,

    /// Let the store connection retry an operation that hit the socket timeout
    /// Default: true
    pub retry_on_timeout: bool,

    /// Opaque options passed through verbatim
    pub extra: HashMap<String, String>,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            socket_timeout: None,
            retry_on_timeout: true,
            extra: HashMap::new(),
        }
    }
}

/// Contract of the external discovery service
///
/// Replica selection among several healthy replicas belongs to the
/// implementation.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Discovery: Send + Sync + 'static {
    /// Connect to the node currently acting as master for `service_name`
    ///
    /// # Errors
    /// [`DiscoveryError::NoMaster`] if no master is currently known
    async fn master_for(
        &self,
        service_name: &str,
        options: &ConnectionOptions,
    ) -> std::result::Result<Arc<dyn StoreEndpoint>, DiscoveryError>;

    /// Connect to a healthy replica of `service_name`
    ///
    /// # Errors
    /// [`DiscoveryError::NoReplica`] if no healthy replica is known
    async fn replica_for(
        &self,
        service_name: &str,
        options: &ConnectionOptions,
    ) -> std::result::Result<Arc<dyn StoreEndpoint>, DiscoveryError>;
}
