use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::ConnectionOptions;
use crate::Discovery;
use crate::DiscoveryError;
use crate::StoreEndpoint;
use crate::StoreError;
use crate::Value;

/// Dataset shared by every stub node, standing in for replication
#[derive(Clone, Default)]
pub(crate) struct SharedData(Arc<Mutex<HashMap<Vec<u8>, Vec<u8>>>>);

/// In-memory store node with fault injection
pub(crate) struct StubNode {
    name: String,
    data: SharedData,
    read_only: bool,
    down: Mutex<bool>,
    faults: Mutex<VecDeque<StoreError>>,
    calls: Mutex<Vec<String>>,
}

impl StubNode {
    pub(crate) fn new(
        name: &str,
        data: SharedData,
    ) -> Arc<Self> {
        Arc::new(Self::build(name, data, false))
    }

    pub(crate) fn replica(
        name: &str,
        data: SharedData,
    ) -> Arc<Self> {
        Arc::new(Self::build(name, data, true))
    }

    fn build(
        name: &str,
        data: SharedData,
        read_only: bool,
    ) -> Self {
        Self {
            name: name.to_string(),
            data,
            read_only,
            down: Mutex::new(false),
            faults: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fail the next call with `error`
    pub(crate) fn fail_next(
        &self,
        error: StoreError,
    ) {
        self.faults.lock().push_back(error);
    }

    /// Fail every call with a connection error until brought back up
    pub(crate) fn set_down(
        &self,
        down: bool,
    ) {
        *self.down.lock() = down;
    }

    /// Operation names received so far, including failed ones
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn key(args: &[Value]) -> std::result::Result<Vec<u8>, StoreError> {
        args.first()
            .and_then(Value::as_bytes)
            .map(<[u8]>::to_vec)
            .ok_or_else(|| StoreError::Response("wrong number of arguments".to_string()))
    }
}

#[async_trait]
impl StoreEndpoint for StubNode {
    fn address(&self) -> String {
        self.name.clone()
    }

    async fn invoke(
        &self,
        operation: &str,
        args: &[Value],
    ) -> std::result::Result<Value, StoreError> {
        self.calls.lock().push(operation.to_string());

        if *self.down.lock() {
            return Err(StoreError::ConnectionFailed(format!("{} is down", self.name)));
        }
        if let Some(fault) = self.faults.lock().pop_front() {
            return Err(fault);
        }

        let mutating = matches!(operation, "set" | "delete" | "incr");
        if mutating && self.read_only {
            return Err(StoreError::ReadOnly(format!(
                "You can't write against a read only replica: {}",
                self.name
            )));
        }

        let mut data = self.data.0.lock();
        match operation {
            "get" => {
                let key = Self::key(args)?;
                Ok(data.get(&key).cloned().map(Value::Bulk).unwrap_or(Value::Nil))
            }
            "set" => {
                let key = Self::key(args)?;
                let value = args
                    .get(1)
                    .and_then(Value::as_bytes)
                    .map(<[u8]>::to_vec)
                    .ok_or_else(|| StoreError::Response("wrong number of arguments".to_string()))?;
                data.insert(key, value);
                Ok(Value::ok())
            }
            "delete" => {
                let removed = args
                    .iter()
                    .filter_map(Value::as_bytes)
                    .filter(|key| data.remove(*key).is_some())
                    .count();
                Ok(Value::Int(removed as i64))
            }
            "incr" => {
                let key = Self::key(args)?;
                let current = match data.get(&key) {
                    Some(raw) => String::from_utf8_lossy(raw)
                        .parse::<i64>()
                        .map_err(|_| StoreError::Response("value is not an integer".to_string()))?,
                    None => 0,
                };
                data.insert(key, (current + 1).to_string().into_bytes());
                Ok(Value::Int(current + 1))
            }
            "dbsize" | "info_keys" => Ok(Value::Int(data.len() as i64)),
            other => Err(StoreError::Response(format!("unknown command '{other}'"))),
        }
    }
}

/// Discovery stub that hands out configured nodes in order
///
/// The n-th master resolution returns the n-th configured master; once the
/// list is exhausted the last one keeps being returned.
pub(crate) struct StubDiscovery {
    masters: Mutex<Vec<Arc<StubNode>>>,
    replicas: Mutex<Vec<Arc<StubNode>>>,
    master_calls: AtomicUsize,
    replica_calls: AtomicUsize,
    last_options: Mutex<Option<ConnectionOptions>>,
}

impl StubDiscovery {
    pub(crate) fn new(
        masters: Vec<Arc<StubNode>>,
        replicas: Vec<Arc<StubNode>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            masters: Mutex::new(masters),
            replicas: Mutex::new(replicas),
            master_calls: AtomicUsize::new(0),
            replica_calls: AtomicUsize::new(0),
            last_options: Mutex::new(None),
        })
    }

    /// Queue the node returned by the next master resolutions
    pub(crate) fn push_master(
        &self,
        node: Arc<StubNode>,
    ) {
        self.masters.lock().push(node);
    }

    pub(crate) fn push_replica(
        &self,
        node: Arc<StubNode>,
    ) {
        self.replicas.lock().push(node);
    }

    pub(crate) fn master_calls(&self) -> usize {
        self.master_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn replica_calls(&self) -> usize {
        self.replica_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_options(&self) -> Option<ConnectionOptions> {
        self.last_options.lock().clone()
    }

    fn pick(
        nodes: &Mutex<Vec<Arc<StubNode>>>,
        counter: &AtomicUsize,
    ) -> Option<Arc<StubNode>> {
        let nodes = nodes.lock();
        let n = counter.fetch_add(1, Ordering::SeqCst);
        nodes.get(n.min(nodes.len().saturating_sub(1))).cloned()
    }
}

#[async_trait]
impl Discovery for StubDiscovery {
    async fn master_for(
        &self,
        service_name: &str,
        options: &ConnectionOptions,
    ) -> std::result::Result<Arc<dyn StoreEndpoint>, DiscoveryError> {
        *self.last_options.lock() = Some(options.clone());
        Self::pick(&self.masters, &self.master_calls)
            .map(|node| node as Arc<dyn StoreEndpoint>)
            .ok_or_else(|| DiscoveryError::NoMaster {
                service_name: service_name.to_string(),
            })
    }

    async fn replica_for(
        &self,
        service_name: &str,
        options: &ConnectionOptions,
    ) -> std::result::Result<Arc<dyn StoreEndpoint>, DiscoveryError> {
        *self.last_options.lock() = Some(options.clone());
        Self::pick(&self.replicas, &self.replica_calls)
            .map(|node| node as Arc<dyn StoreEndpoint>)
            .ok_or_else(|| DiscoveryError::NoReplica {
                service_name: service_name.to_string(),
            })
    }
}
