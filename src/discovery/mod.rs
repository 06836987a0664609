//! Discovery normalization
//!
//! Turns the flat output of a pytest discovery run into records a test explorer can show and a result reader can
//! match against JUnit reports.
//!
//! ## Modules
//!
//! - `model` - Report shapes (`DiscoveryBatch`, `RawTest`, `RawParent`) and `NormalizedTestCase`
//! - `parents` - Per-batch parent index and JUnit class name reconstruction
//! - `normalize` - Per-test normalization and the batch driver
//! - `sink` - Push-style receivers for records
//! - `report` - JSON report loading
//! - `errors` - Error types

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod errors;
pub mod model;
pub mod normalize;
pub mod parents;
pub mod report;
pub mod sink;

pub use errors::{DiscoveryError, ReportError};
pub use model::{DiscoveryBatch, NormalizedTestCase, RawParent, RawTest};
pub use normalize::{DiscoveryOutput, NormalizeOutcome, ParseFailure, normalize_batches, normalize_test};
pub use parents::ParentMap;
pub use report::{load_report, parse_report};
pub use sink::{ConsoleSink, DiscoverySink, NullSink};
