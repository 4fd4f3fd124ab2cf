//! Common types for iLO operations

use std::fmt;
use std::str::FromStr;

use gantry_common::Error;

/// Firmware boot mode as recorded in node capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BootMode {
    /// Legacy BIOS boot
    Bios,
    /// UEFI boot
    Uefi,
}

impl BootMode {
    /// Capability vocabulary (`bios` / `uefi`)
    pub fn as_str(&self) -> &'static str {
        match self {
            BootMode::Bios => "bios",
            BootMode::Uefi => "uefi",
        }
    }

    /// Vocabulary the iLO expects when setting the pending boot mode
    pub fn device_value(&self) -> &'static str {
        match self {
            BootMode::Bios => "LEGACY",
            BootMode::Uefi => "UEFI",
        }
    }
}

impl fmt::Display for BootMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BootMode {
    type Err = Error;

    /// Parse a capability value. Case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bios" => Ok(BootMode::Bios),
            "uefi" => Ok(BootMode::Uefi),
            other => Err(Error::InvalidParameterValue(format!(
                "Invalid boot_mode parameter '{}'.",
                other
            ))),
        }
    }
}

/// Pending boot mode as reported by the iLO
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingBootMode {
    /// The device answered with this raw value (e.g. `LEGACY`, `UEFI`)
    Reported(String),
    /// The firmware cannot answer the query
    Unsupported,
}

impl PendingBootMode {
    /// Map the device answer onto capability vocabulary.
    ///
    /// `LEGACY` (the whole value, any case) becomes `bios`, anything else is
    /// lower-cased. Firmware that cannot answer only knows legacy boot.
    pub fn normalized(&self) -> String {
        match self {
            PendingBootMode::Reported(raw) => match raw.to_lowercase() {
                mode if mode == "legacy" => BootMode::Bios.as_str().to_string(),
                mode => mode,
            },
            PendingBootMode::Unsupported => BootMode::Bios.as_str().to_string(),
        }
    }

    /// The normalized value as a [`BootMode`], if it is one
    pub fn boot_mode(&self) -> Option<BootMode> {
        self.normalized().parse().ok()
    }
}

/// Installed iLO license tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LicenseLevel {
    Standard,
    Essentials,
    Advanced,
}

impl LicenseLevel {
    /// Derive the tier from the license type string returned by the iLO
    pub fn from_license_type(license_type: &str) -> Self {
        if license_type.ends_with("Advanced") {
            LicenseLevel::Advanced
        } else if license_type.ends_with("Essentials") {
            LicenseLevel::Essentials
        } else {
            LicenseLevel::Standard
        }
    }
}

impl fmt::Display for LicenseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LicenseLevel::Standard => write!(f, "standard"),
            LicenseLevel::Essentials => write!(f, "essentials"),
            LicenseLevel::Advanced => write!(f, "advanced"),
        }
    }
}

/// Persistent boot device selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootDevice {
    /// Boot from network (PXE)
    Network,
    /// Boot from local disk
    Hdd,
    /// Boot from CD/DVD
    Cdrom,
}

impl BootDevice {
    pub fn device_value(&self) -> &'static str {
        match self {
            BootDevice::Network => "NETWORK",
            BootDevice::Hdd => "HDD",
            BootDevice::Cdrom => "CDROM",
        }
    }
}

impl fmt::Display for BootDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.device_value())
    }
}
