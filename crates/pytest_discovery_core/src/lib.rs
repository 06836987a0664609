//! Pure identifier and path helpers shared by the pytest discovery normalizer.
//!
//! This crate decomposes the strings a pytest discovery report hands us: `<path>:<line>` source locations,
//! `::`-separated runner ids, and the file paths embedded in both.
//!
//! ## Notes
//!
//! - **No IO**, no logging, no global state. Paths are handled as text with `/` and `\` both accepted as
//!   separators, so reports produced on Windows normalize identically on any host.
//! - Anything that needs a whole discovery batch (parent lookups, record assembly) lives in the `pytest_discovery`
//!   crate.

pub mod ids;
pub mod paths;
pub mod source;

pub use ids::{ID_DELIMITER, execution_path, fully_qualified_name_from_id, parse_runner_id};
pub use source::{SourceError, SourceLocation, parse_source};
