//! Metric Instantiator
//!
//! Binds the catalog's dynamic segments to freshly-fetched device data,
//! producing the full concrete metric set for one collection cycle.
//!
//! Every instance in a cycle carries the same timestamp, captured once by
//! the caller, so metrics from one cycle stay comparable even when device
//! enumeration is slow. Output order is device, then attribute, then kind —
//! not contractual, but stable for deterministic tests.

use crate::catalog::{AttributeKind, HEALTH_LEAF};
use crate::error::{CollectorError, Result};
use crate::metric::{Metric, MetricData, MetricTemplate};
use crate::smart::types::Device;
use std::collections::BTreeMap;
use std::time::SystemTime;

/// Tag key carrying the device serial number on every instance.
pub const SERIAL_TAG: &str = "serialnum";

/// The catalog resolved into the templates instantiation needs, looked up
/// once per cycle. Templates are identified by their leaf and shape, never
/// by raw position in the catalog list.
struct ResolvedCatalog<'a> {
    health: &'a MetricTemplate,
    kinds: Vec<(AttributeKind, &'a MetricTemplate)>,
}

impl<'a> ResolvedCatalog<'a> {
    /// A catalog missing any expected template is a programming bug:
    /// fail fast rather than silently drop data.
    fn resolve(templates: &'a [MetricTemplate]) -> Result<Self> {
        let health = templates
            .iter()
            .find(|t| t.namespace.len() == 5 && t.namespace.leaf_static() == Some(HEALTH_LEAF))
            .ok_or(CollectorError::SchemaInvariant(HEALTH_LEAF))?;

        let mut kinds = Vec::with_capacity(AttributeKind::ALL.len());
        for kind in AttributeKind::ALL {
            let template = templates
                .iter()
                .find(|t| t.namespace.len() == 7 && t.namespace.leaf_static() == Some(kind.leaf()))
                .ok_or(CollectorError::SchemaInvariant(kind.leaf()))?;
            kinds.push((kind, template));
        }
        Ok(ResolvedCatalog { health, kinds })
    }
}

/// Produce the concrete metric set for one cycle: one health instance per
/// device plus one instance per attribute kind for every non-null attribute.
///
/// A device with an empty attribute table still yields its health instance;
/// null attribute slots emit nothing for any kind.
pub fn instantiate(
    devices: &[Device],
    templates: &[MetricTemplate],
    now: SystemTime,
) -> Result<Vec<Metric>> {
    let catalog = ResolvedCatalog::resolve(templates)?;

    let mut metrics = Vec::new();
    for device in devices {
        metrics.push(health_instance(catalog.health, device, now));

        for attribute in device.attributes.iter().flatten() {
            for (kind, template) in &catalog.kinds {
                let mut namespace = template.namespace.clone();
                namespace.bind("interface", device.interface.as_str());
                namespace.bind("device", device.name.as_str());
                namespace.bind("num", attribute.num.to_string());
                namespace.bind("attribute", attribute.name.as_str());

                metrics.push(Metric {
                    namespace,
                    data: kind.read(attribute),
                    timestamp: now,
                    unit: None,
                    tags: serial_tags(device),
                });
            }
        }
    }
    Ok(metrics)
}

fn health_instance(template: &MetricTemplate, device: &Device, now: SystemTime) -> Metric {
    let mut namespace = template.namespace.clone();
    namespace.bind("interface", device.interface.as_str());
    namespace.bind("device", device.name.as_str());

    Metric {
        namespace,
        data: MetricData::Int(device.assessment.health_data()),
        timestamp: now,
        unit: None,
        tags: serial_tags(device),
    }
}

fn serial_tags(device: &Device) -> BTreeMap<String, String> {
    let mut tags = BTreeMap::new();
    tags.insert(SERIAL_TAG.to_string(), device.serial.clone());
    tags
}
