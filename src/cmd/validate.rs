//! `gantry validate` - offline checks of a node's iLO deploy settings

use std::sync::Arc;

use color_eyre::eyre::Result;
use gantry_common::{NodeStore, Task};
use gantry_ilo::{parse_driver_info, validate_boot_mode, IloConfig};
use uuid::Uuid;

/// Validate driver_info and the boot_mode capability without contacting the iLO
pub async fn run(node: Uuid, store: Arc<dyn NodeStore>, config: &IloConfig) -> Result<()> {
    let task = Task::acquire(store, &node).await?;

    let info = parse_driver_info(&task.node, config)?;
    let boot_mode = validate_boot_mode(&task.node)?;

    println!("Node:      {}", task.node.uuid);
    println!("Driver:    {}", task.node.driver);
    println!(
        "iLO:       {}@{}:{} (timeout {}s)",
        info.username, info.address, info.port, info.timeout
    );
    match boot_mode {
        Some(mode) => println!("Boot mode: {}", mode),
        None => println!("Boot mode: unset (discovered at deploy)"),
    }
    Ok(())
}
