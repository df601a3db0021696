//! Operation classification
//!
//! Maps a store operation name to the role that must serve it. The mapping is
//! total: names found in the write set go to the master, every other name goes
//! to a replica. Unknown names are forwarded rather than rejected so that store
//! commands this crate does not list keep working.
//!
//! Routing an unlisted command to a replica is only correct while every
//! mutating command is present in [`WRITE_OPERATIONS`]. The engine logs the
//! fallback path at `warn` so that a missing entry shows up in practice.


use std::collections::HashSet;
use std::fmt;

use lazy_static::lazy_static;

use crate::Role;

/// Routing class of a store operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Mutates state, must reach the master
    Write,
    /// May be served by a replica
    Read,
}

impl OperationKind {
    /// Role of the node that serves this kind of operation
    pub fn role(self) -> Role {
        match self {
            OperationKind::Write => Role::Master,
            OperationKind::Read => Role::Replica,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            OperationKind::Write => write!(f, "write"),
            OperationKind::Read => write!(f, "read"),
        }
    }
}

/// Where a classification verdict came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationSource {
    /// Name is listed in the write set or in the known read commands
    Listed,
    /// Name is not listed anywhere and took the default read route
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub kind: OperationKind,
    pub source: ClassificationSource,
}

lazy_static! {
    /// Every operation that must be served by the master.
    ///
    /// `setitem` and `delitem` are the indexing shorthand names.
    pub static ref WRITE_OPERATIONS: HashSet<&'static str> = [
        "append",
        "bitop",
        "decr",
        "delete",
        "delitem",
        "expire",
        "expireat",
        "getset",
        "incr",
        "incrby",
        "incrbyfloat",
        "mset",
        "msetnx",
        "move",
        "persist",
        "pexpire",
        "pexpireat",
        "psetex",
        "rename",
        "renamenx",
        "restore",
        "set",
        "setitem",
        "setbit",
        "setex",
        "setnx",
        "setrange",
        "ttl",
        "type",
        "watch",
        "unwatch",
        "blpop",
        "brpop",
        "brpoplpush",
        "lindex",
        "lpop",
        "lpush",
        "lpushx",
        "lrem",
        "lset",
        "ltrim",
        "rpop",
        "rpoplpush",
        "rpush",
        "rpushx",
        "sort",
        "sadd",
        "sdiffstore",
        "sinterstore",
        "smove",
        "spop",
        "srem",
        "sunionstore",
        "zadd",
        "zincrby",
        "zlexcount",
        "zrem",
        "zremrangebylex",
        "zremrangebyrank",
        "zremrangebyscore",
        "zunionstore",
        "pfadd",
        "pfmerge",
        "hdel",
        "hincrby",
        "hincrbyfloat",
        "hset",
        "hsetnx",
        "hmset",
        "hvals",
        "publish",
        "cluster",
        "eval",
        "evalsha",
        "script_exists",
        "script_flush",
        "script_kill",
        "script_load",
        "register_script",
        "geoadd",
    ]
    .into_iter()
    .collect();

    /// Read commands known to be safe on a replica.
    ///
    /// Membership does not change routing, it only separates known reads from
    /// the fallback path in the logs. `linsert` and `zinterstore` mutate state
    /// and are deliberately left out so they are reported as fallbacks.
    static ref READ_OPERATIONS: HashSet<&'static str> = [
        "bitcount",
        "bitpos",
        "dump",
        "exists",
        "get",
        "getitem",
        "getbit",
        "getrange",
        "keys",
        "mget",
        "pttl",
        "randomkey",
        "strlen",
        "substr",
        "llen",
        "lrange",
        "scan",
        "scan_iter",
        "sscan",
        "sscan_iter",
        "hscan",
        "hscan_iter",
        "zscan",
        "zscan_iter",
        "scard",
        "sdiff",
        "sinter",
        "sismember",
        "smembers",
        "srandmember",
        "sunion",
        "zcard",
        "zcount",
        "zrange",
        "zrangebylex",
        "zrevrangebylex",
        "zrangebyscore",
        "zrank",
        "zrevrange",
        "zrevrangebyscore",
        "zrevrank",
        "zscore",
        "pfcount",
        "hexists",
        "hget",
        "hgetall",
        "hkeys",
        "hlen",
        "hmget",
        "geodist",
        "geohash",
        "geopos",
        "georadius",
        "georadiusbymember",
    ]
    .into_iter()
    .collect();
}

/// Classify an operation name as [`OperationKind::Write`] or
/// [`OperationKind::Read`].
///
/// Matching is exact, including case. Names outside the write set are reads.
pub fn classify(operation: &str) -> OperationKind {
    classification(operation).kind
}

/// Classify an operation and report whether the verdict came from a listed
/// name or from the default read route.
pub fn classification(operation: &str) -> Classification {
    if WRITE_OPERATIONS.contains(operation) {
        Classification {
            kind: OperationKind::Write,
            source: ClassificationSource::Listed,
        }
    } else if READ_OPERATIONS.contains(operation) {
        Classification {
            kind: OperationKind::Read,
            source: ClassificationSource::Listed,
        }
    } else {
        Classification {
            kind: OperationKind::Read,
            source: ClassificationSource::Fallback,
        }
    }
}

/// Sorted list of operation names routed to the master
pub fn write_operations() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = WRITE_OPERATIONS.iter().copied().collect();
    names.sort_unstable();
    names
}
