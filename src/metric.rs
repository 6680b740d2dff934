//! Metric Catalog Data Model
//!
//! This module defines the hierarchical namespace vocabulary shared by the
//! catalog, the instantiator and the matcher.
//!
//! # Concepts
//!
//! - [`Segment`] - one position in a namespace, either fixed by the schema
//!   (static) or bound at collection time (dynamic)
//! - [`Namespace`] - an ordered sequence of segments identifying a metric
//! - [`MetricTemplate`] - a catalog entry with unbound dynamic segments;
//!   also the shape of a caller's subscription pattern
//! - [`Metric`] - a fully-bound instance produced during a collection cycle,
//!   carrying data, timestamp, unit and tags
//!
//! # Rendering
//!
//! Namespaces render to `/`-separated paths. Unbound dynamic segments render
//! as the wildcard token `*`, which is what subscription matching operates
//! on. The verbose form renders dynamic segments as `[name]` and is meant
//! for catalog listings and log lines.

use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Wildcard token an unbound dynamic segment renders as.
pub const WILDCARD: &str = "*";

/// One position in a metric namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    /// Fixed by the schema.
    Static { value: String },
    /// Bound to a concrete value at instantiation time; unbound in catalog
    /// templates and wildcard subscription patterns.
    Dynamic {
        name: String,
        description: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
}

impl Segment {
    pub fn static_value(value: impl Into<String>) -> Self {
        Segment::Static {
            value: value.into(),
        }
    }

    pub fn dynamic(name: impl Into<String>, description: impl Into<String>) -> Self {
        Segment::Dynamic {
            name: name.into(),
            description: description.into(),
            value: None,
        }
    }

    /// An anonymous unbound dynamic segment, as parsed from a `*` in a
    /// textual subscription pattern.
    pub fn wildcard() -> Self {
        Segment::dynamic(WILDCARD, "")
    }

    /// The value this segment contributes to a rendered path.
    pub fn rendered(&self) -> &str {
        match self {
            Segment::Static { value } => value,
            Segment::Dynamic { value, .. } => value.as_deref().unwrap_or(WILDCARD),
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, Segment::Dynamic { .. })
    }
}

/// Ordered sequence of segments identifying a metric within the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace(Vec<Segment>);

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a static segment (builder form).
    pub fn static_seg(mut self, value: &str) -> Self {
        self.0.push(Segment::static_value(value));
        self
    }

    /// Append an unbound dynamic segment (builder form).
    pub fn dynamic_seg(mut self, name: &str, description: &str) -> Self {
        self.0.push(Segment::dynamic(name, description));
        self
    }

    /// Parse a `/`-separated pattern; `*` parts become unbound dynamic
    /// segments, everything else is static. Empty parts (leading or doubled
    /// separators) are dropped.
    pub fn from_pattern(pattern: &str) -> Self {
        pattern
            .split('/')
            .filter(|part| !part.is_empty())
            .map(|part| {
                if part == WILDCARD {
                    Segment::wildcard()
                } else {
                    Segment::static_value(part)
                }
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Bind the dynamic segment called `name` to `value`. Binding a name
    /// that does not appear in the namespace is a no-op.
    pub fn bind(&mut self, name: &str, value: impl Into<String>) {
        for segment in &mut self.0 {
            if let Segment::Dynamic {
                name: seg_name,
                value: seg_value,
                ..
            } = segment
            {
                if seg_name == name {
                    *seg_value = Some(value.into());
                    return;
                }
            }
        }
    }

    /// The last segment's static value, if the namespace ends in one.
    pub fn leaf_static(&self) -> Option<&str> {
        match self.0.last() {
            Some(Segment::Static { value }) => Some(value),
            _ => None,
        }
    }

    /// `/`-joined path of segment values; unbound dynamic segments render
    /// as `*`.
    pub fn render(&self) -> String {
        let mut path = String::new();
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                path.push('/');
            }
            path.push_str(segment.rendered());
        }
        path
    }

    /// Like [`render`](Self::render) but dynamic segments show as `[name]`,
    /// bound or not.
    pub fn render_verbose(&self) -> String {
        let mut path = String::new();
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                path.push('/');
            }
            match segment {
                Segment::Static { value } => path.push_str(value),
                Segment::Dynamic { name, .. } => {
                    path.push('[');
                    path.push_str(name);
                    path.push(']');
                }
            }
        }
        path
    }
}

impl FromIterator<Segment> for Namespace {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Namespace(iter.into_iter().collect())
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Scalar metric payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricData {
    Int(i64),
    Float(f64),
    Str(String),
}

impl From<i64> for MetricData {
    fn from(value: i64) -> Self {
        MetricData::Int(value)
    }
}

impl From<f64> for MetricData {
    fn from(value: f64) -> Self {
        MetricData::Float(value)
    }
}

impl From<&str> for MetricData {
    fn from(value: &str) -> Self {
        MetricData::Str(value.to_string())
    }
}

impl From<String> for MetricData {
    fn from(value: String) -> Self {
        MetricData::Str(value)
    }
}

/// A catalog entry: namespace with unbound dynamic segments plus catalog
/// metadata. Callers subscribe with values of the same shape, optionally
/// decorated with their own unit and tags, which the matcher merges into
/// every instance the subscription selects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricTemplate {
    pub namespace: Namespace,
    pub version: u32,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

impl MetricTemplate {
    pub fn new(namespace: Namespace, version: u32, description: impl Into<String>) -> Self {
        Self {
            namespace,
            version,
            description: description.into(),
            unit: None,
            tags: BTreeMap::new(),
        }
    }

    /// An ad-hoc subscription pattern parsed from a path string; catalog
    /// metadata is left empty.
    pub fn from_pattern(pattern: &str) -> Self {
        Self::new(Namespace::from_pattern(pattern), 0, "")
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}

/// A fully-bound metric produced during one collection cycle.
///
/// Serializes with the namespace as its rendered segment values and the
/// timestamp as fractional unix seconds, which is the shape handed across
/// the transport boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    #[serde(serialize_with = "namespace_values")]
    pub namespace: Namespace,
    pub data: MetricData,
    #[serde(serialize_with = "unix_seconds")]
    pub timestamp: SystemTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

impl Metric {
    /// One JSON line, ready for the transport boundary.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn namespace_values<S>(namespace: &Namespace, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut seq = serializer.serialize_seq(Some(namespace.len()))?;
    for segment in namespace.segments() {
        seq.serialize_element(segment.rendered())?;
    }
    seq.end()
}

fn unix_seconds<S>(timestamp: &SystemTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let seconds = timestamp
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64();
    serializer.serialize_f64(seconds)
}
