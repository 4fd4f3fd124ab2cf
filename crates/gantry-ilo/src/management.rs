//! Management client facade
//!
//! Opens a session to a node's iLO and wraps each remote call so that any
//! failure surfaces as [`Error::IloOperation`] naming what was attempted.

use std::sync::Arc;

use gantry_common::{Error, Node, Result};
use tracing::{debug, info};
use uuid::Uuid;

use crate::client::{IloClient, IloConnector, LICENSE_TYPE};
use crate::config::IloConfig;
use crate::driver_info::{parse_driver_info, IloDriverInfo};
use crate::error::IloClientError;
use crate::types::{BootDevice, BootMode, LicenseLevel, PendingBootMode};

/// Entry point for iLO management of nodes
#[derive(Clone)]
pub struct IloManagement {
    config: IloConfig,
    connector: Arc<dyn IloConnector>,
}

impl IloManagement {
    pub fn new(config: IloConfig, connector: Arc<dyn IloConnector>) -> Self {
        Self { config, connector }
    }

    pub fn config(&self) -> &IloConfig {
        &self.config
    }

    /// Validate the node's driver_info and build a session.
    ///
    /// No network traffic happens here.
    pub fn session(&self, node: &Node) -> Result<IloSession> {
        let info = parse_driver_info(node, &self.config)?;
        let client = self.connector.connect(&info);
        debug!(node = %node.uuid, address = %info.address, port = info.port, "Created iLO session");
        Ok(IloSession {
            node: node.uuid,
            info,
            client,
        })
    }
}

impl std::fmt::Debug for IloManagement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IloManagement")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// A lazily connected handle to one node's iLO
pub struct IloSession {
    node: Uuid,
    info: IloDriverInfo,
    client: Arc<dyn IloClient>,
}

impl IloSession {
    pub fn node(&self) -> &Uuid {
        &self.node
    }

    pub fn driver_info(&self) -> &IloDriverInfo {
        &self.info
    }

    /// Currently installed license tier
    pub async fn get_license(&self) -> Result<LicenseLevel> {
        const OPERATION: &str = "iLO license check";

        let licenses = self
            .client
            .get_all_licenses()
            .await
            .map_err(|e| Error::ilo_operation(OPERATION, e))?;

        let license_type = licenses
            .get(LICENSE_TYPE)
            .ok_or_else(|| Error::ilo_operation(OPERATION, "license type missing from response"))?;

        Ok(LicenseLevel::from_license_type(license_type))
    }

    /// Make `device` the boot device across reboots
    pub async fn set_persistent_boot(&self, device: BootDevice) -> Result<()> {
        self.client
            .set_persistent_boot(device.device_value())
            .await
            .map_err(|e| {
                Error::ilo_operation(format!("Setting {} as persistent boot device", device), e)
            })?;

        info!(node = %self.node, device = %device, "Node set to boot persistently");
        Ok(())
    }

    /// Boot mode scheduled for next boot.
    ///
    /// Firmware that lacks the query yields [`PendingBootMode::Unsupported`]
    /// rather than an error.
    pub async fn get_pending_boot_mode(&self) -> Result<PendingBootMode> {
        match self.client.get_pending_boot_mode().await {
            Ok(mode) => Ok(PendingBootMode::Reported(mode)),
            Err(IloClientError::CommandNotSupported(command)) => {
                debug!(
                    node = %self.node,
                    command = %command,
                    "Pending boot mode query not supported"
                );
                Ok(PendingBootMode::Unsupported)
            }
            Err(e) => Err(Error::ilo_operation("Getting pending boot mode", e)),
        }
    }

    /// Schedule `boot_mode` for next boot
    pub async fn set_pending_boot_mode(&self, boot_mode: BootMode) -> Result<()> {
        self.client
            .set_pending_boot_mode(boot_mode.device_value())
            .await
            .map_err(|e| Error::ilo_operation(format!("Setting {} as boot mode", boot_mode), e))
    }
}

impl std::fmt::Debug for IloSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IloSession")
            .field("node", &self.node)
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}
