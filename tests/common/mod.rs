use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use replica_router::ConnectionOptions;
use replica_router::Discovery;
use replica_router::DiscoveryError;
use replica_router::StoreEndpoint;
use replica_router::StoreError;
use replica_router::Value;

pub type Dataset = Arc<Mutex<HashMap<Vec<u8>, Vec<u8>>>>;

/// In-memory node; replicas reject writes the way a real read-only replica does
pub struct MemoryNode {
    pub name: &'static str,
    data: Dataset,
    read_only: bool,
    down: AtomicBool,
    pub calls: Mutex<Vec<String>>,
}

impl MemoryNode {
    pub fn master(
        name: &'static str,
        data: Dataset,
    ) -> Arc<Self> {
        Arc::new(Self {
            name,
            data,
            read_only: false,
            down: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn replica(
        name: &'static str,
        data: Dataset,
    ) -> Arc<Self> {
        Arc::new(Self {
            name,
            data,
            read_only: true,
            down: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn shut_down(&self) {
        self.down.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl StoreEndpoint for MemoryNode {
    fn address(&self) -> String {
        self.name.to_string()
    }

    async fn invoke(
        &self,
        operation: &str,
        args: &[Value],
    ) -> Result<Value, StoreError> {
        self.calls.lock().push(operation.to_string());
        if self.down.load(Ordering::SeqCst) {
            return Err(StoreError::ConnectionFailed(format!("{}: connection refused", self.name)));
        }

        let key = args
            .first()
            .and_then(Value::as_bytes)
            .map(<[u8]>::to_vec)
            .ok_or_else(|| StoreError::Response("missing key".to_string()))?;

        match operation {
            "get" => Ok(self.data.lock().get(&key).cloned().map(Value::Bulk).unwrap_or_default()),
            "set" | "delete" if self.read_only => Err(StoreError::ReadOnly(self.name.to_string())),
            "set" => {
                let value = args
                    .get(1)
                    .and_then(Value::as_bytes)
                    .map(<[u8]>::to_vec)
                    .ok_or_else(|| StoreError::Response("missing value".to_string()))?;
                self.data.lock().insert(key, value);
                Ok(Value::ok())
            }
            "delete" => Ok(Value::Int(self.data.lock().remove(&key).map_or(0, |_| 1))),
            other => Err(StoreError::Response(format!("unknown command '{other}'"))),
        }
    }
}

/// Discovery whose current master can be switched by the test
pub struct SwitchableDiscovery {
    master: Mutex<Arc<MemoryNode>>,
    replica: Arc<MemoryNode>,
    pub master_lookups: AtomicUsize,
    pub options_seen: Mutex<Vec<ConnectionOptions>>,
}

impl SwitchableDiscovery {
    pub fn new(
        master: Arc<MemoryNode>,
        replica: Arc<MemoryNode>,
    ) -> Arc<Self> {
        Arc::new(Self {
            master: Mutex::new(master),
            replica,
            master_lookups: AtomicUsize::new(0),
            options_seen: Mutex::new(Vec::new()),
        })
    }

    /// Elect `node` as the new master
    pub fn promote(
        &self,
        node: Arc<MemoryNode>,
    ) {
        *self.master.lock() = node;
    }
}

#[async_trait]
impl Discovery for SwitchableDiscovery {
    async fn master_for(
        &self,
        _service_name: &str,
        options: &ConnectionOptions,
    ) -> Result<Arc<dyn StoreEndpoint>, DiscoveryError> {
        self.master_lookups.fetch_add(1, Ordering::SeqCst);
        self.options_seen.lock().push(options.clone());
        let master = self.master.lock().clone();
        Ok(master)
    }

    async fn replica_for(
        &self,
        _service_name: &str,
        options: &ConnectionOptions,
    ) -> Result<Arc<dyn StoreEndpoint>, DiscoveryError> {
        self.options_seen.lock().push(options.clone());
        Ok(self.replica.clone())
    }
}

/// Master M1, replica R1, standby M2 sharing one dataset
pub fn topology() -> (Arc<MemoryNode>, Arc<MemoryNode>, Arc<MemoryNode>, Arc<SwitchableDiscovery>) {
    let data = Dataset::default();
    let m1 = MemoryNode::master("M1", data.clone());
    let r1 = MemoryNode::replica("R1", data.clone());
    let m2 = MemoryNode::master("M2", data);
    let discovery = SwitchableDiscovery::new(m1.clone(), r1.clone());
    (m1, r1, m2, discovery)
}
