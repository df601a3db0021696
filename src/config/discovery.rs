use std::fmt;

use config::ConfigError;
use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

/// Address of one discovery service node
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct DiscoveryAddr {
    pub host: String,
    pub port: u16,
}

impl DiscoveryAddr {
    pub fn new(
        host: impl Into<String>,
        port: u16,
    ) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(Error::Config(ConfigError::Message(
                "discovery host cannot be empty".to_string(),
            )));
        }
        if self.port == 0 {
            return Err(Error::Config(ConfigError::Message(format!(
                "discovery port for {} must be non-zero",
                self.host
            ))));
        }
        Ok(())
    }
}

impl fmt::Display for DiscoveryAddr {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl From<(&str, u16)> for DiscoveryAddr {
    fn from((host, port): (&str, u16)) -> Self {
        Self::new(host, port)
    }
}
