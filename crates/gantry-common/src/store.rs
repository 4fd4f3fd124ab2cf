//! Node persistence
//!
//! Deploy drivers only need to load a node and write it back. The backend
//! is pluggable: an in-memory map for tests, or a directory of JSON files.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::error::Error;
use crate::node::Node;
use crate::Result;

/// Trait for node persistence
#[async_trait]
pub trait NodeStore: Send + Sync {
    /// Get a node by UUID
    async fn get_node(&self, uuid: &Uuid) -> Result<Option<Node>>;

    /// Save a node, replacing any previous revision
    async fn save_node(&self, node: &Node) -> Result<()>;
}

/// In-memory node store for testing
#[derive(Debug, Default)]
pub struct MemoryNodeStore {
    nodes: RwLock<HashMap<Uuid, Node>>,
    saves: RwLock<u32>,
}

impl MemoryNodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `save_node` calls so far
    pub fn save_count(&self) -> u32 {
        self.saves.read().map(|n| *n).unwrap_or_default()
    }
}

fn poisoned<T>(_: T) -> Error {
    Error::Storage("node store lock poisoned".to_string())
}

#[async_trait]
impl NodeStore for MemoryNodeStore {
    async fn get_node(&self, uuid: &Uuid) -> Result<Option<Node>> {
        Ok(self.nodes.read().map_err(poisoned)?.get(uuid).cloned())
    }

    async fn save_node(&self, node: &Node) -> Result<()> {
        self.nodes
            .write()
            .map_err(poisoned)?
            .insert(node.uuid, node.clone());
        *self.saves.write().map_err(poisoned)? += 1;
        Ok(())
    }
}

/// Stores each node as `<uuid>.json` under a root directory
#[derive(Debug, Clone)]
pub struct DirectoryNodeStore {
    root: PathBuf,
}

impl DirectoryNodeStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn node_path(&self, uuid: &Uuid) -> PathBuf {
        self.root.join(format!("{}.json", uuid))
    }
}

#[async_trait]
impl NodeStore for DirectoryNodeStore {
    async fn get_node(&self, uuid: &Uuid) -> Result<Option<Node>> {
        let path = self.node_path(uuid);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::Storage(format!(
                    "failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    async fn save_node(&self, node: &Node) -> Result<()> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            Error::Storage(format!("failed to create {}: {}", self.root.display(), e))
        })?;

        let path = self.node_path(&node.uuid);
        let tmp = path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(node)?;

        tokio::fs::write(&tmp, content)
            .await
            .map_err(|e| Error::Storage(format!("failed to write {}: {}", tmp.display(), e)))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| Error::Storage(format!("failed to replace {}: {}", path.display(), e)))?;

        debug!(node = %node.uuid, path = %path.display(), "Saved node");
        Ok(())
    }
}
