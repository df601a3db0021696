//! Endpoint cache and failover-retry protocol
//!
//! Each call is classified, sent to the cached endpoint for its role and, on a
//! transient failure, retried exactly once against a freshly resolved endpoint.
//! The fresh endpoint replaces the cached one for every later call.

use std::sync::Arc;

use arc_swap::ArcSwap;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;
use tracing::error;
use tracing::warn;

use super::OperationRouter;
use super::RouterBuilder;
use crate::classifier::classification;
use crate::classifier::ClassificationSource;
use crate::scoped_timer::ScopedTimer;
use crate::ConnectionOptions;
use crate::Discovery;
use crate::EndpointResolver;
use crate::Result;
use crate::Role;
use crate::StoreEndpoint;
use crate::Value;

/// An endpoint together with the number of times its role was re-resolved
struct CachedEndpoint {
    endpoint: Arc<dyn StoreEndpoint>,
    generation: u64,
}

/// Cached handle for one role
///
/// Readers load the handle without locking. Replacement is serialized by
/// `refresh` so concurrent failures on the same stale handle resolve once.
struct RoleSlot {
    role: Role,
    current: ArcSwap<CachedEndpoint>,
    refresh: Mutex<()>,
}

impl RoleSlot {
    fn new(
        role: Role,
        endpoint: Arc<dyn StoreEndpoint>,
    ) -> Self {
        Self {
            role,
            current: ArcSwap::from_pointee(CachedEndpoint {
                endpoint,
                generation: 0,
            }),
            refresh: Mutex::new(()),
        }
    }
}

/// Routes store operations to the cached master or replica
///
/// Created through [`RoutingEngine::builder`] or [`RoutingEngine::connect`].
/// Both endpoints are resolved eagerly at construction.
pub struct RoutingEngine {
    service_name: String,
    resolver: EndpointResolver,
    master: RoleSlot,
    replica: RoleSlot,
}

impl RoutingEngine {
    /// Create a configured engine builder for `service_name`
    pub fn builder(service_name: impl Into<String>) -> RouterBuilder {
        RouterBuilder::new(service_name)
    }

    /// Resolve master and replica for `service_name` and cache both
    ///
    /// # Errors
    /// [`crate::Error::Discovery`] if either role cannot be resolved
    pub async fn connect(
        service_name: impl Into<String>,
        discovery: Arc<dyn Discovery>,
        options: ConnectionOptions,
    ) -> Result<Self> {
        let service_name = service_name.into();
        let resolver = EndpointResolver::new(discovery, options);

        let master = resolver.resolve_master(&service_name).await?;
        let replica = resolver.resolve_replica(&service_name).await?;

        Ok(Self {
            service_name,
            resolver,
            master: RoleSlot::new(Role::Master, master),
            replica: RoleSlot::new(Role::Replica, replica),
        })
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Connection options forwarded on every resolution
    pub fn options(&self) -> &ConnectionOptions {
        self.resolver.options()
    }

    /// Endpoint currently cached for `role`
    pub fn endpoint(
        &self,
        role: Role,
    ) -> Arc<dyn StoreEndpoint> {
        self.slot(role).current.load().endpoint.clone()
    }

    /// Number of times the endpoint for `role` has been replaced
    pub fn failovers(
        &self,
        role: Role,
    ) -> u64 {
        self.slot(role).current.load().generation
    }

    fn slot(
        &self,
        role: Role,
    ) -> &RoleSlot {
        match role {
            Role::Master => &self.master,
            Role::Replica => &self.replica,
        }
    }

    /// Route and execute a single operation.
    ///
    /// # Errors
    /// - Non-transient store errors from the first attempt, unchanged
    /// - [`crate::Error::Discovery`] if re-resolution fails
    /// - Any error from the retry, unchanged
    pub async fn invoke(
        &self,
        operation: &str,
        args: &[Value],
    ) -> Result<Value> {
        let _timer = ScopedTimer::new(&self.service_name, operation);

        let verdict = classification(operation);
        let role = verdict.kind.role();
        match verdict.source {
            ClassificationSource::Listed => {
                debug!("[{}] {} classified as {}", self.service_name, operation, verdict.kind)
            }
            ClassificationSource::Fallback => warn!(
                "[{}] {} is not a listed operation, forwarding to {}",
                self.service_name, operation, role
            ),
        }

        let slot = self.slot(role);
        let cached = slot.current.load_full();

        let first_error = match cached.endpoint.invoke(operation, args).await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() => e,
            Err(e) => {
                debug!(
                    "[{}] {} on {} failed: {:?}",
                    self.service_name,
                    operation,
                    cached.endpoint.address(),
                    e
                );
                return Err(e.into());
            }
        };

        warn!(
            "[{}] {} on {} {} failed with {:?}, re-resolving",
            self.service_name,
            operation,
            role,
            cached.endpoint.address(),
            first_error
        );

        let fresh = self.refresh(slot, cached.generation).await?;
        fresh.endpoint.invoke(operation, args).await.map_err(|e| {
            error!(
                "[{}] retry of {} on {} {} failed: {:?}",
                self.service_name,
                operation,
                role,
                fresh.endpoint.address(),
                e
            );
            e.into()
        })
    }

    /// Replace the endpoint of `slot` unless another call already did.
    ///
    /// `stale` is the generation the caller saw fail. If the slot has moved
    /// past it, the newer endpoint is returned without asking discovery.
    async fn refresh(
        &self,
        slot: &RoleSlot,
        stale: u64,
    ) -> Result<Arc<CachedEndpoint>> {
        let _guard = slot.refresh.lock().await;

        let current = slot.current.load_full();
        if current.generation != stale {
            debug!(
                "[{}] {} already replaced by a concurrent call",
                self.service_name, slot.role
            );
            return Ok(current);
        }

        let endpoint = self.resolver.resolve(slot.role, &self.service_name).await?;
        let fresh = Arc::new(CachedEndpoint {
            endpoint,
            generation: stale + 1,
        });
        slot.current.store(fresh.clone());

        debug!(
            "[{}] {} replaced with {}",
            self.service_name,
            slot.role,
            fresh.endpoint.address()
        );
        Ok(fresh)
    }
}

#[async_trait]
impl OperationRouter for RoutingEngine {
    async fn invoke(
        &self,
        operation: &str,
        args: &[Value],
    ) -> Result<Value> {
        RoutingEngine::invoke(self, operation, args).await
    }
}
