//! Role-aware routing client for a replicated key-value store
//!
//! Operations are classified as writes (sent to the master) or reads (sent to
//! a replica). Master and replica handles come from an external discovery
//! service and are cached; when a cached handle fails with a connection
//! error, a timeout or a read-only rejection, the handle is re-resolved and
//! the operation retried exactly once.
//!
//! Two front-ends share the same [`RoutingEngine`]:
//! - [`BlockingClient`] for thread-blocking callers
//! - [`AsyncClient`] for callers running on an async runtime

pub mod classifier;
mod client;
mod config;
mod discovery;
mod engine;
mod errors;
mod scoped_timer;
mod store;

pub use classifier::classify;
pub use classifier::OperationKind;
pub use client::*;
pub use config::*;
pub use discovery::*;
pub use engine::*;
pub use errors::*;
pub use store::*;

/// Crate version, reported in the connect log line
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//-----------------------------------------------------------
// Test utils
