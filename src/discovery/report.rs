//! Reading the JSON discovery report written by the pytest discovery script.
//!
//! The report is a JSON array with one object per discovery root:
//!
//! ```json
//! [{
//!   "root": "/proj",
//!   "parents": [{"id": "./test_a.py", "kind": "file", "name": "test_a.py", "parentid": "."}],
//!   "tests": [{"id": "./test_a.py::test_x", "name": "test_x", "source": "./test_a.py:3", "parentid": "./test_a.py"}]
//! }]
//! ```
//!
//! Keys this crate does not use (`rootid`, `relpath`, `markers`, ...) are ignored.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::errors::ReportError;
use super::model::DiscoveryBatch;

/// Parse a discovery report from its JSON text.
pub fn parse_report(json: &str) -> Result<Vec<DiscoveryBatch>, ReportError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse the discovery report at `path`.
pub fn load_report(path: &Path) -> Result<Vec<DiscoveryBatch>, ReportError> {
    let json = fs::read_to_string(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let batches = parse_report(&json)?;
    debug!(path = %path.display(), batch_count = batches.len(), "loaded discovery report");
    Ok(batches)
}
