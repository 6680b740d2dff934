//! smartctl Subprocess Probe
//!
//! Production implementation of the device probe boundary. Enumerates
//! devices with `smartctl --scan-open`, then reads each device's identity,
//! health and attribute table with `smartctl -i -H -A`, optionally elevated
//! through `sudo -n`.
//!
//! # Error posture
//!
//! A failed scan invocation aborts the cycle ([`ProbeError`] propagates as
//! a device-enumeration failure). Per-device reads degrade instead: an
//! unreadable or unparseable device is logged and skipped, never fatal.
//! smartctl encodes disk problems in its exit status bits, so a non-zero
//! per-device exit still carries a usable report and is parsed as normal.

use super::types::{Assessment, Device, SmartAttribute};
use crate::config::PluginConfig;
use std::process::{Command, ExitStatus, Output};
use thiserror::Error;
use tracing::{debug, warn};

/// ATA attribute IDs are one byte, so the table has at most 256 slots.
const ATTRIBUTE_SLOTS: usize = 256;

/// Failures crossing the probe boundary.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Seam to the external device-enumeration and attribute-reading mechanism.
///
/// The façade holds this behind a box so tests can inject canned device
/// lists without touching a real disk.
pub trait DeviceProbe: Send + Sync {
    /// Enumerate devices and read their health and attribute tables.
    fn scan(&self, config: &PluginConfig) -> Result<Vec<Device>, ProbeError>;
}

/// One line of `smartctl --scan-open` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEntry {
    /// Device node path, e.g. `/dev/sda`.
    pub path: String,
    /// Device type from the `-d` argument, e.g. `sat` or `nvme`.
    pub dev_type: Option<String>,
}

/// Probe backed by the `smartctl` executable.
#[derive(Debug, Default, Clone, Copy)]
pub struct SmartctlProbe;

impl DeviceProbe for SmartctlProbe {
    fn scan(&self, config: &PluginConfig) -> Result<Vec<Device>, ProbeError> {
        let output = run_smartctl(config, &["--scan-open"])?;
        if !output.status.success() {
            return Err(ProbeError::Failed {
                command: render_command(config, &["--scan-open"]),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let entries = parse_scan(&String::from_utf8_lossy(&output.stdout));
        debug!("smartctl scan found {} device(s)", entries.len());

        let mut devices = Vec::with_capacity(entries.len());
        for entry in entries {
            let mut args: Vec<&str> = vec!["-i", "-H", "-A"];
            if let Some(dev_type) = &entry.dev_type {
                args.push("-d");
                args.push(dev_type);
            }
            args.push(&entry.path);

            // Non-zero exit here usually means the disk has problems, not
            // that the report is missing; parse whatever came back.
            match run_smartctl(config, &args) {
                Ok(report) => {
                    devices.push(parse_report(
                        &entry,
                        &String::from_utf8_lossy(&report.stdout),
                    ));
                }
                Err(e) => {
                    warn!("Skipping {}: {}", entry.path, e);
                }
            }
        }
        Ok(devices)
    }
}

fn render_command(config: &PluginConfig, args: &[&str]) -> String {
    format!("{} {}", config.smartctl_path, args.join(" "))
}

fn run_smartctl(config: &PluginConfig, args: &[&str]) -> Result<Output, ProbeError> {
    let mut command = if config.sudo {
        let mut c = Command::new("sudo");
        c.arg("-n").arg(&config.smartctl_path);
        c
    } else {
        Command::new(&config.smartctl_path)
    };
    command.args(args);

    command.output().map_err(|source| ProbeError::Spawn {
        command: render_command(config, args),
        source,
    })
}

/// Parse `smartctl --scan-open` output into device entries.
///
/// Lines look like `/dev/sda -d sat # /dev/sda [SAT], ATA device`; the part
/// after `#` is a comment. Blank and comment-only lines are skipped.
pub fn parse_scan(output: &str) -> Vec<ScanEntry> {
    let mut entries = Vec::new();
    for line in output.lines() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let Some(path) = tokens.next() else { continue };
        let mut dev_type = None;
        while let Some(token) = tokens.next() {
            if token == "-d" {
                dev_type = tokens.next().map(str::to_string);
            }
        }
        entries.push(ScanEntry {
            path: path.to_string(),
            dev_type,
        });
    }
    entries
}

/// Parse one device's `smartctl -i -H -A` report.
///
/// Understands the ATA information section, the SCSI/NVMe health line
/// variants, and the ATA attribute table. Anything unrecognized degrades to
/// defaults (no serial, unknown assessment, empty attribute table) rather
/// than failing the cycle.
pub fn parse_report(entry: &ScanEntry, report: &str) -> Device {
    let name = entry
        .path
        .rsplit('/')
        .next()
        .unwrap_or(entry.path.as_str())
        .to_string();
    let interface = entry.dev_type.clone().unwrap_or_else(|| "ata".to_string());

    let mut serial = String::new();
    let mut smart_support: Option<bool> = None;
    let mut assessment = Assessment::Unknown;
    let mut attributes: Vec<Option<SmartAttribute>> = Vec::new();
    let mut in_attribute_table = false;

    for line in report.lines() {
        let trimmed = line.trim();

        if in_attribute_table {
            if trimmed.is_empty() {
                in_attribute_table = false;
                continue;
            }
            if let Some(attribute) = parse_attribute_row(trimmed) {
                if attributes.is_empty() {
                    attributes = vec![None; ATTRIBUTE_SLOTS];
                }
                let slot = attribute.num as usize;
                attributes[slot] = Some(attribute);
            }
            continue;
        }

        if let Some(rest) = strip_field(trimmed, "Serial Number:") {
            serial = rest.to_string();
        } else if let Some(rest) = strip_field(trimmed, "Serial number:") {
            serial = rest.to_string();
        } else if let Some(rest) = strip_field(trimmed, "SMART support is:") {
            // Two lines share this prefix: "Available - ..." and
            // "Enabled"/"Disabled"/"Unavailable". Only the latter decides.
            if rest.starts_with("Enabled") {
                smart_support = Some(true);
            } else if rest.starts_with("Disabled") || rest.starts_with("Unavailable") {
                smart_support = Some(false);
            }
        } else if let Some(rest) =
            strip_field(trimmed, "SMART overall-health self-assessment test result:")
        {
            assessment = Assessment::parse(rest);
        } else if let Some(rest) = strip_field(trimmed, "SMART Health Status:") {
            assessment = Assessment::parse(rest);
        } else if trimmed.starts_with("ID#") {
            in_attribute_table = true;
        }
    }

    // NVMe reports carry no "SMART support is" line; a health verdict is
    // evidence enough that SMART data is readable.
    let smart_capable =
        smart_support.unwrap_or(assessment != Assessment::Unknown);

    Device {
        interface,
        name,
        path: entry.path.clone(),
        serial,
        smart_capable,
        assessment,
        attributes,
    }
}

fn strip_field<'a>(line: &'a str, field: &str) -> Option<&'a str> {
    line.strip_prefix(field).map(str::trim)
}

/// Parse one attribute-table row:
/// `ID# ATTRIBUTE_NAME FLAG VALUE WORST THRESH TYPE UPDATED WHEN_FAILED RAW_VALUE`.
fn parse_attribute_row(line: &str) -> Option<SmartAttribute> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 10 {
        return None;
    }
    let num: u8 = tokens[0].parse().ok()?;
    let value: i64 = tokens[3].parse().ok()?;
    let worst: i64 = tokens[4].parse().ok()?;
    let thresh: i64 = tokens[5].parse().ok()?;
    Some(SmartAttribute {
        num,
        name: tokens[1].to_string(),
        value,
        worst,
        thresh,
        attr_type: tokens[6].to_string(),
        updated: tokens[7].to_string(),
        when_failed: tokens[8].to_string(),
        raw: tokens[9..].join(" "),
    })
}
