//! Error types for discovery normalization and report loading.

use std::path::PathBuf;

use pytest_discovery_core::SourceError;
use thiserror::Error;

/// Why a single discovered test was skipped.
///
/// These are per-item and never abort a batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    #[error("malformed source `{raw}`: {reason}")]
    MalformedSource {
        raw: String,
        #[source]
        reason: SourceError,
    },

    #[error("test has an empty `{field}`")]
    EmptyRequiredField { field: &'static str },
}

/// Errors that occur while reading a discovery report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to read discovery report '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid discovery report: {0}")]
    Json(#[from] serde_json::Error),
}
