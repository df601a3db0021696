use std::sync::Arc;

use tracing::warn;

use super::ItemAccess;
use super::Shorthand;
use crate::Error;
use crate::OperationRouter;
use crate::Result;
use crate::RoutingEngine;
use crate::Value;

/// Suspension-based client
///
/// Each call is a future that yields to the scheduler while the store call,
/// and a retry if one is needed, is outstanding. Intended for a
/// single-threaded runtime (`current_thread` or a `LocalSet`), though nothing
/// prevents use on a multi-threaded one. Dropping the future does not abort
/// work already sent to a node.
pub struct AsyncClient<R: OperationRouter = RoutingEngine> {
    router: Arc<R>,
}

impl<R: OperationRouter> Clone for AsyncClient<R> {
    fn clone(&self) -> Self {
        Self {
            router: self.router.clone(),
        }
    }
}

impl<R: OperationRouter> AsyncClient<R> {
    pub fn new(router: Arc<R>) -> Self {
        Self { router }
    }

    pub fn router(&self) -> &Arc<R> {
        &self.router
    }

    /// Route `operation` and await its completion (including any retry)
    pub async fn invoke(
        &self,
        operation: &str,
        args: &[Value],
    ) -> Result<Value> {
        self.router.invoke(operation, args).await
    }

    pub async fn get(
        &self,
        key: &str,
    ) -> Result<Value> {
        self.invoke("get", &[Value::from(key)]).await
    }

    pub async fn set(
        &self,
        key: &str,
        value: impl Into<Value>,
    ) -> Result<Value> {
        self.invoke("set", &[Value::from(key), value.into()]).await
    }

    pub async fn delete(
        &self,
        key: &str,
    ) -> Result<Value> {
        self.invoke("delete", &[Value::from(key)]).await
    }

    fn unsupported(shorthand: Shorthand) -> Error {
        warn!("{} rejected by async client", shorthand.name());
        Error::UnsupportedSyncAccess {
            shorthand: shorthand.name(),
            replacement: shorthand.replacement(),
        }
    }
}

/// Item shorthands cannot suspend, so each one fails before touching the
/// network.
impl<R: OperationRouter> ItemAccess for AsyncClient<R> {
    fn get_item(
        &self,
        _key: &str,
    ) -> Result<Value> {
        Err(Self::unsupported(Shorthand::GetItem))
    }

    fn set_item(
        &self,
        _key: &str,
        _value: Value,
    ) -> Result<Value> {
        Err(Self::unsupported(Shorthand::SetItem))
    }

    fn del_item(
        &self,
        _key: &str,
    ) -> Result<Value> {
        Err(Self::unsupported(Shorthand::DelItem))
    }
}
