//! Probe-boundary object model
//!
//! The device and attribute shapes handed across the probe seam. The probe
//! owns parsing; consumers only see these already-structured views.

use serde::{Deserialize, Serialize};

/// Overall pass/fail assessment a device reports about itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Assessment {
    Pass,
    Fail,
    Warn,
    Unknown,
}

impl Assessment {
    /// Map the free-form assessment text smartctl prints to a variant.
    /// ATA prints `PASSED`/`FAILED!`, SCSI prints `OK`, pySMART-style
    /// sources print `PASS`/`FAIL`/`WARN`.
    pub fn parse(text: &str) -> Self {
        match text
            .trim()
            .trim_end_matches('!')
            .to_ascii_uppercase()
            .as_str()
        {
            "PASS" | "PASSED" | "OK" => Assessment::Pass,
            "FAIL" | "FAILED" => Assessment::Fail,
            "WARN" | "WARNING" => Assessment::Warn,
            _ => Assessment::Unknown,
        }
    }

    /// Health metric payload: 0 for a passing device, 1 for anything else.
    pub fn health_data(self) -> i64 {
        match self {
            Assessment::Pass => 0,
            _ => 1,
        }
    }
}

/// One row of a device's S.M.A.R.T. attribute table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartAttribute {
    /// Attribute ID (one byte on ATA devices).
    pub num: u8,
    /// Attribute name, e.g. `Reallocated_Sector_Ct`.
    pub name: String,
    /// Current normalized value.
    pub value: i64,
    /// Worst normalized value recorded.
    pub worst: i64,
    /// Failure threshold.
    pub thresh: i64,
    /// `Pre-fail` or `Old_age`.
    pub attr_type: String,
    /// `Always` or `Offline`.
    pub updated: String,
    /// When the attribute last failed, or `-`.
    pub when_failed: String,
    /// Vendor raw value, kept as text (may carry annotations like
    /// `33 (Min/Max 20/45)`).
    pub raw: String,
}

/// A storage device as seen at the probe boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Device interface type, e.g. `sat`, `nvme`, `scsi`.
    pub interface: String,
    /// Short device name, e.g. `sda`.
    pub name: String,
    /// Full device node path, e.g. `/dev/sda`.
    pub path: String,
    /// Serial number reported by the device.
    pub serial: String,
    /// Whether SMART is supported and enabled. Devices without it are
    /// filtered out before instantiation.
    pub smart_capable: bool,
    /// Overall self-assessment.
    pub assessment: Assessment,
    /// Attribute table indexed by attribute ID; absent IDs are `None` and
    /// emit no metrics.
    pub attributes: Vec<Option<SmartAttribute>>,
}
