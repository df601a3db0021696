//! Client front-ends over the routing engine
//!
//! Both clients share one [`OperationRouter`](crate::OperationRouter) and
//! therefore one failover protocol:
//! - [`BlockingClient`] - blocks the calling thread, supports item shorthands
//! - [`AsyncClient`] - suspends the calling task, rejects item shorthands
//!
//! # Basic Usage
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use replica_router::AsyncClient;
//! use replica_router::Discovery;
//! use replica_router::RoutingEngine;
//!
//! async fn run(discovery: Arc<dyn Discovery>) -> replica_router::Result<()> {
//!     let engine = RoutingEngine::builder("master2")
//!         .socket_timeout(Duration::from_millis(500))
//!         .build(discovery)
//!         .await?;
//!
//!     let client = AsyncClient::new(Arc::new(engine));
//!     client.set("user:1001", "Alice").await?;
//!     let value = client.get("user:1001").await?;
//!     println!("User data: {value}");
//!     Ok(())
//! }
//! ```

mod blocking;
mod cooperative;
mod shorthand;

pub use blocking::*;
pub use cooperative::*;
pub use shorthand::*;
