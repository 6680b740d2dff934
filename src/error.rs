use crate::smart::probe::ProbeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("Device enumeration failed: {0}")]
    DeviceEnumeration(#[from] ProbeError),

    #[error("Invalid subscription pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("Subscription namespace is empty")]
    EmptyNamespace,

    #[error("Metric catalog is missing the {0} template")]
    SchemaInvariant(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CollectorError>;
