//! iLO client configuration
//!
//! Defaults applied when a node's driver_info does not override them.

use serde::Deserialize;

/// Default timeout (in seconds) for iLO operations
pub const DEFAULT_CLIENT_TIMEOUT: u64 = 60;

/// Default port for iLO operations
pub const DEFAULT_CLIENT_PORT: u16 = 443;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IloConfig {
    /// Timeout (in seconds) for iLO operations
    pub client_timeout: u64,

    /// Port to be used for iLO operations
    pub client_port: u16,
}

impl Default for IloConfig {
    fn default() -> Self {
        Self {
            client_timeout: DEFAULT_CLIENT_TIMEOUT,
            client_port: DEFAULT_CLIENT_PORT,
        }
    }
}

impl IloConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client_timeout(mut self, timeout: u64) -> Self {
        self.client_timeout = timeout;
        self
    }

    pub fn with_client_port(mut self, port: u16) -> Self {
        self.client_port = port;
        self
    }
}
