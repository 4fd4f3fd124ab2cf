//! Task handle for a single operation on a node
//!
//! The surrounding orchestration is expected to hold an exclusive lock on
//! the node for the lifetime of a task; nothing here enforces it.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::Error;
use crate::node::Node;
use crate::store::NodeStore;
use crate::Result;

pub struct Task {
    pub node: Node,
    store: Arc<dyn NodeStore>,
}

impl Task {
    pub fn new(node: Node, store: Arc<dyn NodeStore>) -> Self {
        Self { node, store }
    }

    /// Load a node from the store and wrap it in a task
    pub async fn acquire(store: Arc<dyn NodeStore>, uuid: &Uuid) -> Result<Self> {
        let node = store
            .get_node(uuid)
            .await?
            .ok_or(Error::NodeNotFound(*uuid))?;
        Ok(Self::new(node, store))
    }

    /// Commit the node back to the store
    pub async fn save(&mut self) -> Result<()> {
        self.node.touch();
        self.store.save_node(&self.node).await
    }
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task").field("node", &self.node.uuid).finish()
    }
}
