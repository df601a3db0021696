use std::sync::Arc;

use tokio::runtime::Builder;
use tokio::runtime::Runtime;
use tracing::debug;

use super::ItemAccess;
use super::Shorthand;
use crate::Discovery;
use crate::OperationRouter;
use crate::Result;
use crate::RouterBuilder;
use crate::RoutingEngine;
use crate::Value;

/// Thread-blocking client
///
/// Every call runs the shared router to completion on a private
/// current-thread runtime before returning. Must not be used from inside an
/// async context; use [`AsyncClient`](crate::AsyncClient) there.
pub struct BlockingClient<R: OperationRouter = RoutingEngine> {
    router: Arc<R>,
    runtime: Runtime,
}

impl BlockingClient<RoutingEngine> {
    /// Build a routing engine from `builder` and wrap it
    ///
    /// # Errors
    /// - [`crate::Error::Runtime`] if the runtime cannot start
    /// - Any error from [`RouterBuilder::build`]
    pub fn connect(
        builder: RouterBuilder,
        discovery: Arc<dyn Discovery>,
    ) -> Result<Self> {
        let runtime = Self::runtime()?;
        let engine = runtime.block_on(builder.build(discovery))?;
        Ok(Self {
            router: Arc::new(engine),
            runtime,
        })
    }
}

impl<R: OperationRouter> BlockingClient<R> {
    pub fn new(router: Arc<R>) -> Result<Self> {
        Ok(Self {
            router,
            runtime: Self::runtime()?,
        })
    }

    fn runtime() -> Result<Runtime> {
        Ok(Builder::new_current_thread().enable_all().build()?)
    }

    pub fn router(&self) -> &Arc<R> {
        &self.router
    }

    /// Route `operation` and block until it completes (including any retry)
    pub fn invoke(
        &self,
        operation: &str,
        args: &[Value],
    ) -> Result<Value> {
        self.runtime.block_on(self.router.invoke(operation, args))
    }

    pub fn get(
        &self,
        key: &str,
    ) -> Result<Value> {
        self.invoke("get", &[Value::from(key)])
    }

    pub fn set(
        &self,
        key: &str,
        value: impl Into<Value>,
    ) -> Result<Value> {
        self.invoke("set", &[Value::from(key), value.into()])
    }

    pub fn delete(
        &self,
        key: &str,
    ) -> Result<Value> {
        self.invoke("delete", &[Value::from(key)])
    }

    fn dispatch(
        &self,
        shorthand: Shorthand,
        args: &[Value],
    ) -> Result<Value> {
        debug!("{} dispatched as {}", shorthand.name(), shorthand.operation());
        self.invoke(shorthand.operation(), args)
    }
}

impl<R: OperationRouter> ItemAccess for BlockingClient<R> {
    fn get_item(
        &self,
        key: &str,
    ) -> Result<Value> {
        self.dispatch(Shorthand::GetItem, &[Value::from(key)])
    }

    fn set_item(
        &self,
        key: &str,
        value: Value,
    ) -> Result<Value> {
        self.dispatch(Shorthand::SetItem, &[Value::from(key), value])
    }

    fn del_item(
        &self,
        key: &str,
    ) -> Result<Value> {
        self.dispatch(Shorthand::DelItem, &[Value::from(key)])
    }
}
