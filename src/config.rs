//! Gantry configuration file
//!
//! ```yaml
//! state_dir: /var/lib/gantry/nodes
//! ilo:
//!   client_timeout: 60
//!   client_port: 443
//! ```

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use gantry_ilo::IloConfig;
use serde::Deserialize;

pub const DEFAULT_STATE_DIR: &str = "/var/lib/gantry/nodes";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GantryConfig {
    /// Directory holding one JSON file per node
    pub state_dir: Option<PathBuf>,

    pub ilo: IloConfig,
}

impl GantryConfig {
    /// Load from a YAML file. No path means built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
        Self::from_yaml(&content).wrap_err_with(|| format!("invalid config {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document deserializes to null
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}
