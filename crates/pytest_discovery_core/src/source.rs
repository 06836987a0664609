//! Parsing of the `<path>:<line>` source strings attached to discovered tests.

use thiserror::Error;

use crate::paths::strip_relative_marker;

/// Why a source string could not be split into a path and a line number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("expected `<path>:<line>` but found no `:` separator")]
    MissingSeparator,

    #[error("source location has an empty path")]
    EmptyPath,

    #[error("`{line}` is not a valid line number")]
    InvalidLine { line: String },
}

/// A source string split into its path and line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation<'a> {
    /// Path as reported by the runner, relative markers removed.
    pub path: &'a str,
    pub line: u32,
}

/// Split a `<path>:<line>` source string.
///
/// ## Parameters
/// - `source`: the raw source string from the discovery report.
///
/// ## Returns
/// - (`SourceLocation`): the path with leading `./` / `.\` markers stripped, and the line number.
///
/// ## Errors
/// - `MissingSeparator` when there is no `:` at all.
/// - `EmptyPath` when nothing (or only relative markers) precedes the last `:`.
/// - `InvalidLine` when the text after the last `:` is not a non-negative integer.
///
/// ## Notes
/// - The split happens on the *last* `:`, so Windows drive letters (`C:\proj\test_a.py:12`) survive.
///
/// ## Examples
/// ```rust
/// use pytest_discovery_core::source::parse_source;
/// let location = parse_source("./tests/test_math.py:14").unwrap();
/// assert_eq!(location.path, "tests/test_math.py");
/// assert_eq!(location.line, 14);
/// ```
pub fn parse_source(source: &str) -> Result<SourceLocation<'_>, SourceError> {
    let (path, line) = source.rsplit_once(':').ok_or(SourceError::MissingSeparator)?;

    let path = strip_relative_marker(path);
    if path.is_empty() {
        return Err(SourceError::EmptyPath);
    }

    let line = line
        .parse::<u32>()
        .map_err(|_| SourceError::InvalidLine { line: line.to_string() })?;

    Ok(SourceLocation { path, line })
}
