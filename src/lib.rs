#![forbid(unsafe_code)]
//! pytest discovery normalization
//!
//! Translates the discovery report written by pytest into uniquely identifiable test case records for a test
//! explorer. Each record carries three independently usable representations of a test: an absolute source path,
//! an execution path that re-invokes exactly that test, and the class name the runner's JUnit report will use for
//! it, so discovery records can later be matched with execution results.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `discovery`
//!   modules enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Malformed input**: Never a panic and never fatal for a batch; a test that cannot be normalized is reported as
//!   a `ParseFailure` and skipped.

pub mod cli;
pub mod discovery;
pub mod settings;

pub use discovery::{
    DiscoveryBatch, DiscoveryError, DiscoveryOutput, DiscoverySink, NormalizeOutcome, NormalizedTestCase, ParentMap,
    ParseFailure, RawParent, RawTest, ReportError, load_report, normalize_batches, normalize_test, parse_report,
};
pub use settings::AdapterSettings;
