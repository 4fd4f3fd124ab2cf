//! Gantry common types
//!
//! The node record, its persistence seam, the per-operation task handle and
//! the capability string codec shared by the deploy drivers.

pub mod capabilities;
pub mod error;
pub mod node;
pub mod store;
pub mod task;

pub use capabilities::{
    get_capability, get_node_capability, is_valid_token, set_node_capability, Capabilities,
};
pub use error::Error;
pub use node::{Node, NodeMetadata, CAPABILITIES_PROPERTY};
pub use store::{DirectoryNodeStore, MemoryNodeStore, NodeStore};
pub use task::Task;

pub type Result<T> = std::result::Result<T, Error>;
