//! `gantry capability` - inspect and edit a node's capability string

use std::process::ExitCode;
use std::sync::Arc;

use clap::Subcommand;
use color_eyre::eyre::Result;
use gantry_common::{get_node_capability, set_node_capability, NodeStore, Task};
use tracing::info;
use uuid::Uuid;

#[derive(Subcommand, Debug)]
pub enum CapabilityCommand {
    /// Print the value of a capability
    Get { node: Uuid, key: String },
    /// Add or update a capability
    Set {
        node: Uuid,
        key: String,
        value: String,
    },
    /// Remove a capability
    Unset { node: Uuid, key: String },
    /// Print every well-formed capability, one per line
    List { node: Uuid },
}

pub async fn run(command: CapabilityCommand, store: Arc<dyn NodeStore>) -> Result<ExitCode> {
    match command {
        CapabilityCommand::Get { node, key } => {
            let task = Task::acquire(store, &node).await?;
            match get_node_capability(&task.node, &key) {
                Some(value) => {
                    println!("{}", value);
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    eprintln!("Capability '{}' is not set on node {}", key, node);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        CapabilityCommand::Set { node, key, value } => {
            let mut task = Task::acquire(store, &node).await?;
            set_node_capability(&mut task, &key, Some(&value)).await?;
            info!(node = %node, key = %key, value = %value, "Capability set");
            Ok(ExitCode::SUCCESS)
        }
        CapabilityCommand::Unset { node, key } => {
            let mut task = Task::acquire(store, &node).await?;
            set_node_capability(&mut task, &key, None).await?;
            info!(node = %node, key = %key, "Capability removed");
            Ok(ExitCode::SUCCESS)
        }
        CapabilityCommand::List { node } => {
            let task = Task::acquire(store, &node).await?;
            let raw = task.node.capabilities().unwrap_or_default();
            for (key, value) in gantry_common::Capabilities::parse(&raw).iter() {
                println!("{}:{}", key, value);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
