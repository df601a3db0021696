//! Routing engine
//!
//! Provides the shared dispatch core used by both client flavours:
//! - [`RoutingEngine`] - cached endpoints plus the failover-retry protocol
//! - [`RouterBuilder`] - configurable engine construction
//! - [`OperationRouter`] - invocation seam the clients depend on

mod builder;
mod routing_engine;

pub use builder::*;
pub use routing_engine::*;


#[cfg(test)]
use mockall::automock;

use async_trait::async_trait;

use crate::Result;
use crate::Value;

/// Anything that can route a named store operation to the right node
#[cfg_attr(test, automock)]
#[async_trait]
pub trait OperationRouter: Send + Sync + 'static {
    /// Route `operation` by its classification and execute it with `args`
    async fn invoke(
        &self,
        operation: &str,
        args: &[Value],
    ) -> Result<Value>;
}
