//! Device Data Adapter
//!
//! Thin translation from the probe boundary into the device set consumed by
//! the instantiator.
//!
//! # Error Handling
//!
//! Enumeration failures (probe executable missing, permission denied)
//! propagate and abort the cycle with no partial metrics. Devices that
//! merely lack SMART support are non-fatal: each is dropped with one
//! warning and the cycle continues.

pub mod probe;
pub mod types;

pub use probe::{DeviceProbe, ProbeError, SmartctlProbe};
pub use types::{Assessment, Device, SmartAttribute};

use crate::config::PluginConfig;
use crate::error::Result;
use tracing::warn;

/// Fetch all SMART-capable devices through the given probe.
pub fn fetch_devices(probe: &dyn DeviceProbe, config: &PluginConfig) -> Result<Vec<Device>> {
    let scanned = probe.scan(config)?;

    let mut devices = Vec::with_capacity(scanned.len());
    for device in scanned {
        if device.smart_capable {
            devices.push(device);
        } else {
            warn!(
                "Skipping {} >> {}. SMART is not enabled.",
                device.interface, device.path
            );
        }
    }
    Ok(devices)
}
