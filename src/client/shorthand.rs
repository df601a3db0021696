use crate::Result;
use crate::Value;

/// Item-style shorthands for the three most common operations
///
/// Each shorthand is an exact equivalent of a named operation: same
/// classification, same failover behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shorthand {
    GetItem,
    SetItem,
    DelItem,
}

impl Shorthand {
    /// Name under which the shorthand is classified
    pub fn name(self) -> &'static str {
        match self {
            Shorthand::GetItem => "getitem",
            Shorthand::SetItem => "setitem",
            Shorthand::DelItem => "delitem",
        }
    }

    /// Named operation the shorthand dispatches to
    pub fn operation(self) -> &'static str {
        match self {
            Shorthand::GetItem => "get",
            Shorthand::SetItem => "set",
            Shorthand::DelItem => "delete",
        }
    }

    /// Call the async client offers in place of the shorthand
    pub(crate) fn replacement(self) -> &'static str {
        match self {
            Shorthand::GetItem => "client.get(key).await",
            Shorthand::SetItem => "client.set(key, value).await",
            Shorthand::DelItem => "client.delete(key).await",
        }
    }
}

/// Synchronous item access, the Rust counterpart of `client[key]`,
/// `client[key] = value` and `del client[key]`
pub trait ItemAccess {
    /// Read `key`; [`Value::Nil`] if absent
    fn get_item(
        &self,
        key: &str,
    ) -> Result<Value>;

    fn set_item(
        &self,
        key: &str,
        value: Value,
    ) -> Result<Value>;

    /// Remove `key`, returning the number of keys deleted
    fn del_item(
        &self,
        key: &str,
    ) -> Result<Value>;
}
