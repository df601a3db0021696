use std::fmt;

/// Argument or reply exchanged with a store node
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value {
    /// Missing key or empty reply
    #[default]
    Nil,
    Int(i64),
    /// Binary-safe string
    Bulk(Vec<u8>),
    /// Simple status reply such as `OK`
    Status(String),
    Array(Vec<Value>),
}

impl Value {
    pub fn ok() -> Self {
        Value::Status("OK".to_string())
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Borrow the payload of a bulk or status reply
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bulk(data) => Some(data),
            Value::Status(status) => Some(status.as_bytes()),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "(nil)"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Bulk(data) => write!(f, "{}", String::from_utf8_lossy(data)),
            Value::Status(status) => write!(f, "{status}"),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Bulk(s.as_bytes().to_vec())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Bulk(s.into_bytes())
    }
}

impl From<&[u8]> for Value {
    fn from(data: &[u8]) -> Self {
        Value::Bulk(data.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(data: Vec<u8>) -> Self {
        Value::Bulk(data)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}
