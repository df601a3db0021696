//! Error hierarchy for the routing client
//!
//! Errors are grouped by the collaborator that produced them:
//! - [`DiscoveryError`]: the topology service could not hand out an endpoint
//! - [`StoreError`]: a store node rejected or failed an operation
//! - [`Error::UnsupportedSyncAccess`]: a shorthand was used on the async client

use config::ConfigError;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Master or replica could not be resolved
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// Failure reported by a store node
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Indexing shorthand invoked on the cooperative client
    #[error("{shorthand} is not supported by the async client, use `{replacement}` instead")]
    UnsupportedSyncAccess {
        shorthand: &'static str,
        replacement: &'static str,
    },

    /// Router configuration validation failures
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The blocking client could not start its runtime
    #[error("Failed to start blocking runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

impl Error {
    /// Returns the store error if this error came from a store node
    pub fn as_store_error(&self) -> Option<&StoreError> {
        match self {
            Error::Store(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiscoveryError {
    /// Discovery knows no master for the service
    #[error("No master found for service {service_name}")]
    NoMaster { service_name: String },

    /// Discovery knows no healthy replica for the service
    #[error("No healthy replica found for service {service_name}")]
    NoReplica { service_name: String },

    /// None of the discovery addresses answered
    #[error("Discovery service unreachable: {0}")]
    Unreachable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Connection could not be established or was dropped
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Socket timeout elapsed
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// A write reached a node that is now a read-only replica
    #[error("Node is read-only: {0}")]
    ReadOnly(String),

    /// Any other error reply
    #[error("Store error: {0}")]
    Response(String),
}

impl StoreError {
    /// Whether this failure means the cached endpoint may be stale.
    ///
    /// Only connection failures, timeouts and read-only rejections qualify;
    /// these are the conditions that trigger re-resolution and a single retry.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            StoreError::ConnectionFailed(_) | StoreError::Timeout(_) | StoreError::ReadOnly(_)
        )
    }
}
