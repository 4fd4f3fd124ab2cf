//! PXE deploy for iLO-managed nodes

use std::collections::BTreeMap;

use async_trait::async_trait;
use gantry_common::{Result, Task};
use gantry_ilo::{
    common_properties, set_boot_mode, update_boot_mode_capability, validate_boot_mode,
    BootDevice, IloManagement,
};
use tracing::info;

use crate::netboot::{DeployInterface, DeployState};

/// Network-boot deploy preceded by iLO boot mode and boot device setup
#[derive(Debug)]
pub struct IloPxeDeploy<D> {
    inner: D,
    management: IloManagement,
}

impl<D: DeployInterface> IloPxeDeploy<D> {
    pub fn new(inner: D, management: IloManagement) -> Self {
        Self { inner, management }
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }
}

#[async_trait]
impl<D: DeployInterface> DeployInterface for IloPxeDeploy<D> {
    fn properties(&self) -> BTreeMap<String, String> {
        let mut properties = self.inner.properties();
        properties.extend(common_properties());
        properties
    }

    async fn validate(&self, task: &Task) -> Result<()> {
        validate_boot_mode(&task.node)?;
        self.inner.validate(task).await
    }

    /// Steps run strictly in order; a failure stops the deploy without
    /// undoing earlier steps.
    async fn deploy(&self, task: &mut Task) -> Result<DeployState> {
        let session = self.management.session(&task.node)?;

        match validate_boot_mode(&task.node)? {
            Some(boot_mode) => set_boot_mode(&session, Some(boot_mode)).await?,
            None => update_boot_mode_capability(&session, task).await?,
        }

        session.set_persistent_boot(BootDevice::Network).await?;

        info!(node = %task.node.uuid, "Handing over to network boot deploy");
        self.inner.deploy(task).await
    }
}
