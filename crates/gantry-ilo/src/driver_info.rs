//! Driver info validation
//!
//! Extracts the iLO connection parameters from a node's `driver_info`.
//! Every missing mandatory parameter is reported in a single error, as is
//! every malformed optional one.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use gantry_common::{Error, Node, Result};
use serde_json::Value;

use crate::config::IloConfig;

pub const ILO_ADDRESS: &str = "ilo_address";
pub const ILO_USERNAME: &str = "ilo_username";
pub const ILO_PASSWORD: &str = "ilo_password";
pub const CLIENT_PORT: &str = "client_port";
pub const CLIENT_TIMEOUT: &str = "client_timeout";

pub const REQUIRED_PROPERTIES: &[(&str, &str)] = &[
    (ILO_ADDRESS, "IP address or hostname of the iLO. Required."),
    (
        ILO_USERNAME,
        "username for the iLO with administrator privileges. Required.",
    ),
    (ILO_PASSWORD, "password for ilo_username. Required."),
];

pub const OPTIONAL_PROPERTIES: &[(&str, &str)] = &[
    (CLIENT_PORT, "port to be used for iLO operations. Optional."),
    (
        CLIENT_TIMEOUT,
        "timeout (in seconds) for iLO operations. Optional.",
    ),
];

/// Every driver_info parameter understood by the iLO driver, with its description
pub fn common_properties() -> BTreeMap<String, String> {
    REQUIRED_PROPERTIES
        .iter()
        .chain(OPTIONAL_PROPERTIES)
        .map(|(name, description)| (name.to_string(), description.to_string()))
        .collect()
}

/// Validated iLO connection parameters
#[derive(Clone, PartialEq, Eq)]
pub struct IloDriverInfo {
    pub address: String,
    pub username: String,
    pub password: String,
    pub port: u16,
    /// Seconds
    pub timeout: u64,
}

impl IloDriverInfo {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl fmt::Debug for IloDriverInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IloDriverInfo")
            .field("address", &self.address)
            .field("username", &self.username)
            .field("password", &"******")
            .field("port", &self.port)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Validate the node's driver_info and merge in configured defaults.
///
/// Missing mandatory parameters fail with `MissingParameterValue` before the
/// optional ones are looked at. Optional parameters that are not integers
/// fail with `InvalidParameterValue`.
pub fn parse_driver_info(node: &Node, config: &IloConfig) -> Result<IloDriverInfo> {
    let info = &node.driver_info;

    let (address, username, password) = match (
        required_str(info.get(ILO_ADDRESS)),
        required_str(info.get(ILO_USERNAME)),
        required_str(info.get(ILO_PASSWORD)),
    ) {
        (Some(address), Some(username), Some(password)) => (address, username, password),
        (address, username, password) => {
            let error_msgs: Vec<String> = [
                (ILO_ADDRESS, address.is_none()),
                (ILO_USERNAME, username.is_none()),
                (ILO_PASSWORD, password.is_none()),
            ]
            .iter()
            .filter(|(_, missing)| *missing)
            .map(|(param, _)| format!("'{}' not supplied to IloDriver.", param))
            .collect();
            return Err(Error::MissingParameterValue(format!(
                "The following parameters were missing while parsing driver_info:\n{}",
                error_msgs.join("\n")
            )));
        }
    };

    let mut error_msgs = Vec::new();
    let port = match optional_int(info.get(CLIENT_PORT), CLIENT_PORT, config.client_port) {
        Ok(port) => port,
        Err(e) => {
            error_msgs.push(e);
            config.client_port
        }
    };
    let timeout = match optional_int(
        info.get(CLIENT_TIMEOUT),
        CLIENT_TIMEOUT,
        config.client_timeout,
    ) {
        Ok(timeout) => timeout,
        Err(e) => {
            error_msgs.push(e);
            config.client_timeout
        }
    };
    if !error_msgs.is_empty() {
        return Err(Error::InvalidParameterValue(format!(
            "The following errors were encountered while parsing driver_info:\n{}",
            error_msgs.join("\n")
        )));
    }

    Ok(IloDriverInfo {
        address,
        username,
        password,
        port,
        timeout,
    })
}

/// Mandatory values are taken as text; `null` counts as absent
fn required_str(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

/// Coerce an optional driver_info value to an integer, falling back to `default`
fn optional_int<T>(
    value: Option<&Value>,
    param: &str,
    default: T,
) -> std::result::Result<T, String>
where
    T: TryFrom<i64>,
{
    let parsed = match value {
        None | Some(Value::Null) => return Ok(default),
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(_) => None,
    };

    let int = parsed.ok_or_else(|| format!("'{}' is not an integer.", param))?;
    T::try_from(int).map_err(|_| format!("'{}' is out of range.", param))
}
