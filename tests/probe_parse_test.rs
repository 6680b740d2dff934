//! smartctl output parsing against captured sample text

use smartmon_collector::smart::probe::{parse_report, parse_scan, ScanEntry};
use smartmon_collector::smart::types::Assessment;

const SCAN_OUTPUT: &str = "\
/dev/sda -d sat # /dev/sda [SAT], ATA device
/dev/sdb -d scsi # /dev/sdb, SCSI device
/dev/nvme0 -d nvme # /dev/nvme0, NVMe device

# comment-only line
";

const ATA_REPORT: &str = "\
smartctl 7.4 2023-08-01 r5530 [x86_64-linux-6.8.0] (local build)
Copyright (C) 2002-23, Bruce Allen, Christian Franke, www.smartmontools.org

=== START OF INFORMATION SECTION ===
Model Family:     Western Digital Red
Device Model:     WDC WD40EFRX-68N32N0
Serial Number:    WD-WCC7K1234567
Firmware Version: 82.00A82
SMART support is: Available - device has SMART capability.
SMART support is: Enabled

=== START OF READ SMART DATA SECTION ===
SMART overall-health self-assessment test result: PASSED

SMART Attributes Data Structure revision number: 16
Vendor Specific SMART Attributes with Thresholds:
ID# ATTRIBUTE_NAME          FLAG     VALUE WORST THRESH TYPE      UPDATED  WHEN_FAILED RAW_VALUE
  1 Raw_Read_Error_Rate     0x002f   200   200   051    Pre-fail  Always       -       0
  5 Reallocated_Sector_Ct   0x0033   200   200   140    Pre-fail  Always       -       0
194 Temperature_Celsius     0x0022   119   109   000    Old_age   Always       -       33 (Min/Max 20/45)

";

const DISABLED_REPORT: &str = "\
=== START OF INFORMATION SECTION ===
Serial Number:    S0METHING
SMART support is: Available - device has SMART capability.
SMART support is: Disabled
";

const FAILED_REPORT: &str = "\
Serial Number:    DOOMED-1
SMART support is: Enabled
SMART overall-health self-assessment test result: FAILED!
";

const SCSI_REPORT: &str = "\
=== START OF INFORMATION SECTION ===
Vendor:               SEAGATE
Serial number:        Z1X2C3V4
SMART Health Status: OK
";

#[test]
fn test_parse_scan_extracts_paths_and_types() {
    // Given: Captured --scan-open output with a trailing comment line
    // When: Parsing it
    let entries = parse_scan(SCAN_OUTPUT);

    // Then: Three entries with their device types, comments ignored
    assert_eq!(
        entries,
        vec![
            ScanEntry {
                path: "/dev/sda".to_string(),
                dev_type: Some("sat".to_string()),
            },
            ScanEntry {
                path: "/dev/sdb".to_string(),
                dev_type: Some("scsi".to_string()),
            },
            ScanEntry {
                path: "/dev/nvme0".to_string(),
                dev_type: Some("nvme".to_string()),
            },
        ]
    );
}

#[test]
fn test_parse_ata_report() {
    // Given: A captured ATA report with an attribute table
    let entry = ScanEntry {
        path: "/dev/sda".to_string(),
        dev_type: Some("sat".to_string()),
    };

    // When: Parsing it
    let device = parse_report(&entry, ATA_REPORT);

    // Then: Identity, support and assessment are extracted
    assert_eq!(device.name, "sda");
    assert_eq!(device.interface, "sat");
    assert_eq!(device.serial, "WD-WCC7K1234567");
    assert!(device.smart_capable);
    assert_eq!(device.assessment, Assessment::Pass);

    // And: Attribute rows land in their ID slots, gaps stay null
    let non_null = device.attributes.iter().flatten().count();
    assert_eq!(non_null, 3);
    assert!(device.attributes[2].is_none());

    let realloc = device.attributes[5].as_ref().unwrap();
    assert_eq!(realloc.name, "Reallocated_Sector_Ct");
    assert_eq!(realloc.value, 200);
    assert_eq!(realloc.worst, 200);
    assert_eq!(realloc.thresh, 140);
    assert_eq!(realloc.attr_type, "Pre-fail");
    assert_eq!(realloc.updated, "Always");
    assert_eq!(realloc.when_failed, "-");
    assert_eq!(realloc.raw, "0");

    // And: A raw value with annotations is kept verbatim
    let temp = device.attributes[194].as_ref().unwrap();
    assert_eq!(temp.raw, "33 (Min/Max 20/45)");
}

#[test]
fn test_parse_report_with_smart_disabled() {
    // Given: A report whose final support line says Disabled
    let entry = ScanEntry {
        path: "/dev/sdc".to_string(),
        dev_type: Some("sat".to_string()),
    };

    // When: Parsing it
    let device = parse_report(&entry, DISABLED_REPORT);

    // Then: The device is marked SMART-incapable and gets filtered later
    assert!(!device.smart_capable);
    assert!(device.attributes.is_empty());
}

#[test]
fn test_parse_report_with_failed_assessment() {
    // Given: A report with the FAILED! verdict
    let entry = ScanEntry {
        path: "/dev/sdd".to_string(),
        dev_type: None,
    };

    // When: Parsing it
    let device = parse_report(&entry, FAILED_REPORT);

    // Then: Assessment maps to Fail and the interface falls back to ata
    assert_eq!(device.assessment, Assessment::Fail);
    assert_eq!(device.interface, "ata");
    assert_eq!(device.assessment.health_data(), 1);
}

#[test]
fn test_parse_scsi_report_health_line_variant() {
    // Given: A SCSI report with its own serial and health line spellings
    let entry = ScanEntry {
        path: "/dev/sdb".to_string(),
        dev_type: Some("scsi".to_string()),
    };

    // When: Parsing it
    let device = parse_report(&entry, SCSI_REPORT);

    // Then: The health verdict alone marks the device capable
    assert_eq!(device.serial, "Z1X2C3V4");
    assert_eq!(device.assessment, Assessment::Pass);
    assert!(device.smart_capable);
}

#[test]
fn test_parse_garbage_report_degrades_to_defaults() {
    // Given: Output that is not a smartctl report at all
    let entry = ScanEntry {
        path: "/dev/sdz".to_string(),
        dev_type: Some("sat".to_string()),
    };

    // When: Parsing it
    let device = parse_report(&entry, "not smartctl output\n\x00\x01");

    // Then: No panic; the device degrades to unknown and incapable
    assert_eq!(device.assessment, Assessment::Unknown);
    assert!(!device.smart_capable);
    assert!(device.serial.is_empty());
    assert!(device.attributes.is_empty());
}

#[test]
fn test_assessment_parse_vocabulary() {
    // Given: The assessment spellings the probe encounters
    // Then: Each maps to the right variant
    assert_eq!(Assessment::parse("PASSED"), Assessment::Pass);
    assert_eq!(Assessment::parse("PASS"), Assessment::Pass);
    assert_eq!(Assessment::parse("OK"), Assessment::Pass);
    assert_eq!(Assessment::parse("FAILED!"), Assessment::Fail);
    assert_eq!(Assessment::parse("FAIL"), Assessment::Fail);
    assert_eq!(Assessment::parse("WARN"), Assessment::Warn);
    assert_eq!(Assessment::parse("something else"), Assessment::Unknown);
}
