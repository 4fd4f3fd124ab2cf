//! The Node record - a bare-metal machine as seen by a deploy driver.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

/// Property holding the encoded capability string
pub const CAPABILITIES_PROPERTY: &str = "capabilities";

/// A bare-metal node managed through its BMC.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    /// Primary key - UUIDv7
    pub uuid: Uuid,

    /// Name of the driver responsible for this node (e.g. `pxe_ilo`)
    pub driver: String,

    /// Connection parameters for the driver (BMC address, credentials, ...)
    #[serde(default)]
    pub driver_info: HashMap<String, Value>,

    /// Free-form node properties, including the capability string
    #[serde(default)]
    pub properties: HashMap<String, Value>,

    pub metadata: NodeMetadata,
}

impl Node {
    /// Create a new node with a fresh identifier
    pub fn new(driver: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            uuid: Uuid::now_v7(),
            driver: driver.into(),
            driver_info: HashMap::new(),
            properties: HashMap::new(),
            metadata: NodeMetadata {
                created_at: now,
                updated_at: now,
            },
        }
    }

    /// Set a driver_info entry
    pub fn with_driver_info(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.driver_info.insert(key.into(), value.into());
        self
    }

    /// Set the raw capability string
    pub fn with_capabilities(mut self, capabilities: impl Into<String>) -> Self {
        self.set_capabilities(capabilities);
        self
    }

    /// The raw capability string, if any.
    ///
    /// Non-string values are rendered to text rather than rejected.
    pub fn capabilities(&self) -> Option<String> {
        self.properties
            .get(CAPABILITIES_PROPERTY)
            .and_then(|value| match value {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            })
    }

    pub fn set_capabilities(&mut self, capabilities: impl Into<String>) {
        self.properties.insert(
            CAPABILITIES_PROPERTY.to_string(),
            Value::String(capabilities.into()),
        );
    }

    /// Mark the record as modified now
    pub fn touch(&mut self) {
        self.metadata.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeMetadata {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
