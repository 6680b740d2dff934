//! Plugin Façade
//!
//! The three operations a host metrics framework drives: the metric
//! catalog, the configuration policy and the collection cycle. The façade
//! holds zero transport dependencies — the runner binary (or any host
//! adapter) wires these operations to whatever protocol the host speaks.
//!
//! # Collection cycle
//!
//! 1. Fetch devices through the probe (enumeration failure aborts).
//! 2. Capture one wall-clock timestamp for the whole cycle.
//! 3. Instantiate the full concrete metric set against a fresh catalog.
//! 4. Match each subscription independently and union the results,
//!    without deduplication across overlapping subscriptions.
//!
//! A malformed subscription loses only itself: it is logged at warn level
//! and the remaining subscriptions still match.

use crate::catalog;
use crate::config::{ConfigPolicy, PluginConfig};
use crate::error::Result;
use crate::instantiate::instantiate;
use crate::matcher::match_subscription;
use crate::metric::{Metric, MetricTemplate};
use crate::smart::{self, DeviceProbe, SmartctlProbe};
use std::time::SystemTime;
use tracing::{debug, warn};

/// The SMARTMON collector plugin.
pub struct SmartmonCollector {
    probe: Box<dyn DeviceProbe>,
}

impl Default for SmartmonCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl SmartmonCollector {
    /// Collector backed by the smartctl subprocess probe.
    pub fn new() -> Self {
        Self::with_probe(Box::new(SmartctlProbe))
    }

    /// Collector backed by a caller-supplied probe. Tests inject mock
    /// device lists here.
    pub fn with_probe(probe: Box<dyn DeviceProbe>) -> Self {
        Self { probe }
    }

    /// The full metric catalog. Rebuilt on every call; pure and idempotent.
    pub fn catalog(&self) -> Vec<MetricTemplate> {
        catalog::build_catalog()
    }

    /// The configuration options this plugin recognizes.
    pub fn config_policy(&self) -> ConfigPolicy {
        ConfigPolicy::declare()
    }

    /// Run one collection cycle and return the instances matching any of
    /// the given subscriptions.
    pub fn collect(
        &self,
        subscriptions: &[MetricTemplate],
        config: &PluginConfig,
    ) -> Result<Vec<Metric>> {
        let devices = smart::fetch_devices(self.probe.as_ref(), config)?;

        // One timestamp for the whole cycle, captured before the binding
        // loops so every instance stays comparable.
        let now = SystemTime::now();
        let instances = instantiate(&devices, &catalog::build_catalog(), now)?;
        debug!(
            "Instantiated {} metric(s) across {} device(s)",
            instances.len(),
            devices.len()
        );

        let mut collected = Vec::new();
        for subscription in subscriptions {
            match match_subscription(subscription, &instances) {
                Ok(matched) => collected.extend(matched),
                Err(e) => {
                    warn!(
                        "Skipping subscription {}: {}",
                        subscription.namespace.render(),
                        e
                    );
                }
            }
        }
        Ok(collected)
    }
}
