//! iLO client seam
//!
//! The transport (RIBCL over HTTPS) lives outside this crate. Deploy logic
//! only needs the four calls below; each is a blocking round trip to the
//! BMC bounded by the configured client timeout.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::driver_info::IloDriverInfo;
use crate::error::IloClientError;

/// Key of the license type in [`IloClient::get_all_licenses`] output
pub const LICENSE_TYPE: &str = "LICENSE_TYPE";

/// Raw operations on an iLO
///
/// Implementations speak the vendor protocol and use vendor vocabulary
/// (`LEGACY`, `UEFI`, `NETWORK`, ...).
#[async_trait]
pub trait IloClient: Send + Sync {
    /// Installed license details, including [`LICENSE_TYPE`]
    async fn get_all_licenses(&self) -> Result<HashMap<String, String>, IloClientError>;

    /// Boot mode that takes effect on next boot.
    ///
    /// Firmware without this command reports
    /// [`IloClientError::CommandNotSupported`].
    async fn get_pending_boot_mode(&self) -> Result<String, IloClientError>;

    /// Set the boot mode for next boot
    async fn set_pending_boot_mode(&self, boot_mode: &str) -> Result<(), IloClientError>;

    /// Set the boot device permanently until changed
    async fn set_persistent_boot(&self, device: &str) -> Result<(), IloClientError>;
}

/// Builds clients from validated connection parameters.
///
/// Must not perform network I/O; clients connect lazily on first call.
pub trait IloConnector: Send + Sync {
    fn connect(&self, info: &IloDriverInfo) -> Arc<dyn IloClient>;
}

impl<F> IloConnector for F
where
    F: Fn(&IloDriverInfo) -> Arc<dyn IloClient> + Send + Sync,
{
    fn connect(&self, info: &IloDriverInfo) -> Arc<dyn IloClient> {
        self(info)
    }
}
