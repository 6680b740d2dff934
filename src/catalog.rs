//! Namespace Schema Builder
//!
//! Declares the metric catalog: seven per-attribute-kind templates plus one
//! aggregate health template per device. The catalog is static knowledge —
//! it is rebuilt on every request and carries no state.
//!
//! # Catalog shape
//!
//! ```text
//! intel/smartmon/[interface]/[device]/[num]/[attribute]/threshold
//! intel/smartmon/[interface]/[device]/[num]/[attribute]/value
//! intel/smartmon/[interface]/[device]/[num]/[attribute]/whenfailed
//! intel/smartmon/[interface]/[device]/[num]/[attribute]/worst
//! intel/smartmon/[interface]/[device]/[num]/[attribute]/type
//! intel/smartmon/[interface]/[device]/[num]/[attribute]/updated
//! intel/smartmon/[interface]/[device]/[num]/[attribute]/raw
//! intel/smartmon/[interface]/[device]/health
//! ```

use crate::metric::{MetricData, MetricTemplate, Namespace};
use crate::smart::types::SmartAttribute;

/// Version reported for every template in the catalog.
pub const CATALOG_VERSION: u32 = 1;

/// Description attached to every template in the catalog.
pub const CATALOG_DESCRIPTION: &str = "SMARTMON list of dynamic devices and attributes";

/// Static leaf of the per-device health template.
pub const HEALTH_LEAF: &str = "health";

/// The S.M.A.R.T. attribute fields exposed as namespace leaves.
///
/// Each kind reads one column of the device's attribute table; the variant
/// carries the dispatch so instantiation never compares leaf strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Threshold,
    Value,
    WhenFailed,
    Worst,
    Type,
    Updated,
    Raw,
}

impl AttributeKind {
    /// Every kind, in catalog order.
    pub const ALL: [AttributeKind; 7] = [
        AttributeKind::Threshold,
        AttributeKind::Value,
        AttributeKind::WhenFailed,
        AttributeKind::Worst,
        AttributeKind::Type,
        AttributeKind::Updated,
        AttributeKind::Raw,
    ];

    /// The static namespace leaf this kind appears under.
    pub const fn leaf(self) -> &'static str {
        match self {
            AttributeKind::Threshold => "threshold",
            AttributeKind::Value => "value",
            AttributeKind::WhenFailed => "whenfailed",
            AttributeKind::Worst => "worst",
            AttributeKind::Type => "type",
            AttributeKind::Updated => "updated",
            AttributeKind::Raw => "raw",
        }
    }

    /// Read the attribute field this kind exposes.
    pub fn read(self, attribute: &SmartAttribute) -> MetricData {
        match self {
            AttributeKind::Threshold => MetricData::Int(attribute.thresh),
            AttributeKind::Value => MetricData::Int(attribute.value),
            AttributeKind::WhenFailed => MetricData::Str(attribute.when_failed.clone()),
            AttributeKind::Worst => MetricData::Int(attribute.worst),
            AttributeKind::Type => MetricData::Str(attribute.attr_type.clone()),
            AttributeKind::Updated => MetricData::Str(attribute.updated.clone()),
            AttributeKind::Raw => MetricData::Str(attribute.raw.clone()),
        }
    }
}

/// The `intel/smartmon/[interface]/[device]` prefix shared by every template.
fn device_prefix() -> Namespace {
    Namespace::new()
        .static_seg("intel")
        .static_seg("smartmon")
        .dynamic_seg("interface", "device interface")
        .dynamic_seg("device", "device name")
}

/// Build the full metric catalog: one template per attribute kind in
/// [`AttributeKind::ALL`] order, then the health template last.
pub fn build_catalog() -> Vec<MetricTemplate> {
    let mut templates = Vec::with_capacity(AttributeKind::ALL.len() + 1);

    for kind in AttributeKind::ALL {
        let namespace = device_prefix()
            .dynamic_seg("num", "attribute number")
            .dynamic_seg("attribute", "attribute name")
            .static_seg(kind.leaf());
        templates.push(MetricTemplate::new(
            namespace,
            CATALOG_VERSION,
            CATALOG_DESCRIPTION,
        ));
    }

    templates.push(MetricTemplate::new(
        device_prefix().static_seg(HEALTH_LEAF),
        CATALOG_VERSION,
        CATALOG_DESCRIPTION,
    ));

    templates
}
