//! SMARTMON Telemetry Collector Plugin
//!
//! A collector plugin that polls S.M.A.R.T. disk health and attribute data
//! and exposes it as a hierarchical metric catalog to a host
//! metrics-collection framework.
//!
//! # Overview
//!
//! The plugin enumerates local storage devices through `smartctl`, maps
//! each device's health verdict and attribute table into a namespaced
//! metric catalog, and filters the concrete instances against the caller's
//! subscription patterns (which may contain `*` wildcard segments), merging
//! subscription tags and units into every match.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐   subprocess   ┌───────────────────────────────┐
//! │ smartctl │ ◄────────────► │          Collector            │
//! └──────────┘                │  ┌───────┐   ┌─────────────┐  │   catalog /    ┌──────┐
//!                             │  │ probe │──►│ instantiate │  │ ◄────────────► │ host │
//!                             │  └───────┘   └──────┬──────┘  │  collect(subs) └──────┘
//!                             │  ┌─────────┐        │         │
//!                             │  │ catalog │────────┤         │
//!                             │  └─────────┘        ▼         │
//!                             │              ┌─────────────┐  │
//!                             │              │   matcher   │  │
//!                             │              └─────────────┘  │
//!                             └───────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`catalog`] - namespace schema builder and attribute-kind dispatch
//! - [`metric`] - segments, namespaces, templates and concrete instances
//! - [`smart`] - device data adapter and the smartctl probe boundary
//! - [`instantiate`] - binds device data into concrete metric instances
//! - [`matcher`] - wildcard subscription matching with tag/unit merge
//! - [`plugin`] - the façade a host framework drives
//! - [`config`] - plugin configuration and declarative config policy
//! - [`error`] - error types
//!
//! # Quick Start
//!
//! ```no_run
//! use smartmon_collector::{config::PluginConfig, plugin::SmartmonCollector};
//!
//! fn main() -> anyhow::Result<()> {
//!     let collector = SmartmonCollector::new();
//!     let subscriptions = collector.catalog();
//!     let config = PluginConfig::default();
//!     for metric in collector.collect(&subscriptions, &config)? {
//!         println!("{}", metric.to_json()?);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - ✅ Declarative metric catalog with static and dynamic namespace segments
//! - ✅ Per-device health verdict plus seven attribute-kind metrics
//! - ✅ Wildcard subscription matching with tag and unit inheritance
//! - ✅ SMART-incapable devices skipped with a warning, never surfaced
//! - ✅ Optional `sudo -n` elevation for the smartctl probe

pub mod catalog;
pub mod config;
pub mod error;
pub mod instantiate;
pub mod matcher;
pub mod metric;
pub mod plugin;
pub mod smart;
