//! Network-boot deploy interface
//!
//! The generic PXE deploy (image staging, boot config) is provided by the
//! caller. Driver-specific deploys wrap it and add their own steps around
//! these calls.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use gantry_common::{Result, Task};

/// State a node is left in once `deploy` returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployState {
    /// Waiting for the ramdisk to call back
    DeployWait,
    /// Deployment finished synchronously
    DeployDone,
}

impl DeployState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeployState::DeployWait => "wait call-back",
            DeployState::DeployDone => "deploy complete",
        }
    }
}

impl fmt::Display for DeployState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deploy interface of a driver
#[async_trait]
pub trait DeployInterface: Send + Sync {
    /// driver_info parameters this interface understands, with descriptions
    fn properties(&self) -> BTreeMap<String, String>;

    /// Check the node can be deployed. Must not touch the hardware.
    async fn validate(&self, task: &Task) -> Result<()>;

    /// Start deploying the node
    async fn deploy(&self, task: &mut Task) -> Result<DeployState>;
}
