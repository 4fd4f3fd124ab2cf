//! Boot mode negotiation
//!
//! Converges a node's pending boot mode on the value requested through its
//! `boot_mode` capability, or records what the iLO reports when no value was
//! requested. Writes only happen when the device disagrees.

use gantry_common::{
    get_node_capability, is_valid_token, set_node_capability, Node, Result, Task,
};
use tracing::{info, warn};

use crate::management::IloSession;
use crate::types::BootMode;

/// Capability key holding the requested boot mode
pub const BOOT_MODE_CAPABILITY: &str = "boot_mode";

/// Requested boot mode from the node's capabilities.
///
/// Fails with `InvalidParameterValue` when the capability holds anything
/// other than `bios` or `uefi`.
pub fn validate_boot_mode(node: &Node) -> Result<Option<BootMode>> {
    get_node_capability(node, BOOT_MODE_CAPABILITY)
        .map(|mode| mode.parse::<BootMode>())
        .transpose()
}

/// Make `boot_mode` the pending boot mode.
///
/// `None` means no preference and leaves the device untouched.
pub async fn set_boot_mode(session: &IloSession, boot_mode: Option<BootMode>) -> Result<()> {
    let Some(boot_mode) = boot_mode else {
        info!(node = %session.node(), "No boot mode specified");
        return Ok(());
    };

    let pending = session.get_pending_boot_mode().await?;
    if pending.boot_mode() == Some(boot_mode) {
        info!(node = %session.node(), boot_mode = %boot_mode, "Node pending boot mode already set");
        return Ok(());
    }

    session.set_pending_boot_mode(boot_mode).await?;

    info!(
        node = %session.node(),
        from = %pending.normalized(),
        boot_mode = %boot_mode,
        "Node boot mode is set"
    );
    Ok(())
}

/// Record the device's pending boot mode in the node's `boot_mode` capability.
///
/// A reply that cannot be stored as a capability value (empty, or holding
/// `,` or `:`) is logged and left unrecorded.
pub async fn update_boot_mode_capability(session: &IloSession, task: &mut Task) -> Result<()> {
    let pending = session.get_pending_boot_mode().await?;
    let boot_mode = pending.normalized();

    if !is_valid_token(&boot_mode) {
        warn!(
            node = %task.node.uuid,
            boot_mode = %boot_mode,
            "iLO reported a pending boot mode that cannot be recorded as a capability"
        );
        return Ok(());
    }

    if pending.boot_mode().is_none() {
        warn!(
            node = %task.node.uuid,
            boot_mode = %boot_mode,
            "iLO reported an unrecognised pending boot mode"
        );
    }

    set_node_capability(task, BOOT_MODE_CAPABILITY, Some(&boot_mode)).await?;
    info!(node = %task.node.uuid, boot_mode = %boot_mode, "Recorded boot_mode capability");
    Ok(())
}
