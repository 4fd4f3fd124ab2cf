//! Gantry deploy drivers
//!
//! [`IloPxeDeploy`] wraps any network-boot [`DeployInterface`] and prepares
//! the node's iLO before handing over:
//!
//! ```text
//!  validate:  boot_mode capability check ──▶ inner.validate
//!
//!  deploy:    boot_mode capability?
//!               ├─ set   ──▶ converge pending boot mode
//!               └─ unset ──▶ record device boot mode as capability
//!             persistent boot device = NETWORK
//!             inner.deploy ──▶ DeployState
//! ```
//!
//! # Example
//!
//! ```ignore
//! use gantry_deploy::IloPxeDeploy;
//! use gantry_ilo::{IloConfig, IloManagement};
//!
//! let management = IloManagement::new(IloConfig::default(), connector);
//! let deploy = IloPxeDeploy::new(pxe_deploy, management);
//!
//! deploy.validate(&task).await?;
//! let state = deploy.deploy(&mut task).await?;
//! ```

pub mod ilo_pxe;
pub mod netboot;

pub use ilo_pxe::IloPxeDeploy;
pub use netboot::{DeployInterface, DeployState};
