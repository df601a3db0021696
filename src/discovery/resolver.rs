use std::sync::Arc;

use tracing::debug;
use tracing::error;

use super::ConnectionOptions;
use super::Discovery;
use super::Role;
use crate::DiscoveryError;
use crate::StoreEndpoint;

/// Produces live master and replica handles from the discovery service
///
/// Every call queries discovery again. Caching the returned handle is the
/// routing engine's job.
#[derive(Clone)]
pub struct EndpointResolver {
    discovery: Arc<dyn Discovery>,
    options: ConnectionOptions,
}

impl EndpointResolver {
    pub fn new(
        discovery: Arc<dyn Discovery>,
        options: ConnectionOptions,
    ) -> Self {
        Self { discovery, options }
    }

    pub fn options(&self) -> &ConnectionOptions {
        &self.options
    }

    /// Resolve the current master of `service_name`
    pub async fn resolve_master(
        &self,
        service_name: &str,
    ) -> std::result::Result<Arc<dyn StoreEndpoint>, DiscoveryError> {
        self.resolve(Role::Master, service_name).await
    }

    /// Resolve a healthy replica of `service_name`
    pub async fn resolve_replica(
        &self,
        service_name: &str,
    ) -> std::result::Result<Arc<dyn StoreEndpoint>, DiscoveryError> {
        self.resolve(Role::Replica, service_name).await
    }

    pub async fn resolve(
        &self,
        role: Role,
        service_name: &str,
    ) -> std::result::Result<Arc<dyn StoreEndpoint>, DiscoveryError> {
        let result = match role {
            Role::Master => self.discovery.master_for(service_name, &self.options).await,
            Role::Replica => self.discovery.replica_for(service_name, &self.options).await,
        };

        match result {
            Ok(endpoint) => {
                debug!(
                    "resolved {} for service {}: {}",
                    role,
                    service_name,
                    endpoint.address()
                );
                Ok(endpoint)
            }
            Err(e) => {
                error!("resolve {} for service {} failed: {:?}", role, service_name, e);
                Err(e)
            }
        }
    }
}
