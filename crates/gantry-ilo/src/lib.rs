//! Gantry iLO integration
//!
//! This crate drives an HPE iLO management controller on behalf of the
//! deploy drivers: it validates a node's connection parameters, wraps the
//! remote calls behind a session with uniform error reporting, and keeps the
//! node's firmware boot mode in step with its `boot_mode` capability.
//!
//! The wire protocol is not implemented here. Callers plug a transport in
//! through [`IloConnector`] / [`IloClient`].
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use gantry_common::{Node, Result};
//! use gantry_ilo::{
//!     set_boot_mode, validate_boot_mode, BootDevice, IloConfig, IloConnector, IloManagement,
//! };
//!
//! # async fn example(node: Node, connector: Arc<dyn IloConnector>) -> Result<()> {
//! let management = IloManagement::new(IloConfig::default(), connector);
//! let session = management.session(&node)?;
//!
//! // Converge on the requested boot mode, then PXE boot persistently
//! set_boot_mode(&session, validate_boot_mode(&node)?).await?;
//! session.set_persistent_boot(BootDevice::Network).await?;
//! # Ok(())
//! # }
//! ```

pub mod boot_mode;
pub mod client;
pub mod config;
pub mod driver_info;
pub mod error;
pub mod management;
pub mod types;

pub use boot_mode::{
    set_boot_mode, update_boot_mode_capability, validate_boot_mode, BOOT_MODE_CAPABILITY,
};
pub use client::{IloClient, IloConnector, LICENSE_TYPE};
pub use config::IloConfig;
pub use driver_info::{common_properties, parse_driver_info, IloDriverInfo};
pub use error::IloClientError;
pub use management::{IloManagement, IloSession};
pub use types::{BootDevice, BootMode, LicenseLevel, PendingBootMode};
