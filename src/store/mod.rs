//! Store collaborator contract
//!
//! The router never speaks the store's wire protocol. A resolved node is an
//! already-connected [`StoreEndpoint`] that executes a named operation with
//! positional arguments.

mod value;

pub use value::*;

#[cfg(test)]
use mockall::automock;

use async_trait::async_trait;

use crate::StoreError;

/// Connected handle to a single store node (master or replica)
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StoreEndpoint: Send + Sync + 'static {
    /// Address of the node, used for logging only
    fn address(&self) -> String;

    /// Executes `operation` with `args` on this node.
    ///
    /// # Errors
    /// - [`StoreError::ConnectionFailed`], [`StoreError::Timeout`] and
    ///   [`StoreError::ReadOnly`] mark the handle as possibly stale
    /// - [`StoreError::Response`] for any other rejection
    async fn invoke(
        &self,
        operation: &str,
        args: &[Value],
    ) -> std::result::Result<Value, StoreError>;
}
