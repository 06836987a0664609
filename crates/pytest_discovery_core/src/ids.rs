//! Runner-native test ids (`<file>::<segment>[::<segment>...]`).
//!
//! pytest addresses a test by its file path followed by `::`-separated node names: the class (if any), then the
//! function, possibly carrying a parametrization suffix such as `test_add[1-2]`.

use crate::paths::{file_name, file_stem, join, parent_dir, strip_relative_marker};

/// Delimiter between the segments of a runner id.
pub const ID_DELIMITER: &str = "::";

/// Split a runner id into its `::`-separated segments.
///
/// Segments are returned exactly as written; no trimming or marker stripping is applied.
pub fn parse_runner_id(id: &str) -> Vec<&str> {
    id.split(ID_DELIMITER).collect()
}

/// Build the fully qualified test name for a runner id.
///
/// ## Parameters
/// - `id`: the runner-native id.
///
/// ## Returns
/// - (`String`): the id with leading relative markers removed. A two-segment id (a function defined directly in a
///   module) gets the module's file stem inserted as its class segment, so `a/b.py::test_x` becomes
///   `a/b.py::b::test_x`. Any other shape is returned as-is.
///
/// ## Notes
/// - Result matching groups tests by class segment; without the synthesized segment, module-level functions would
///   be grouped under `b.py` or under nothing at all.
///
/// ## Examples
/// ```rust
/// use pytest_discovery_core::ids::fully_qualified_name_from_id;
/// assert_eq!(fully_qualified_name_from_id("a/b.py::test_x"), "a/b.py::b::test_x");
/// assert_eq!(fully_qualified_name_from_id("a/b.py::TestC::test_x"), "a/b.py::TestC::test_x");
/// ```
pub fn fully_qualified_name_from_id(id: &str) -> String {
    let id = strip_relative_marker(id);
    match parse_runner_id(id).as_slice() {
        [file, test] => format!("{file}{ID_DELIMITER}{}{ID_DELIMITER}{test}", file_stem(file)),
        _ => id.to_string(),
    }
}

/// Build the path that re-invokes exactly one test.
///
/// ## Parameters
/// - `absolute_file_path`: resolved path of the file that defines the test.
/// - `runner_id`: the runner-native id of the test.
///
/// ## Returns
/// - (`String`): when the file name of `absolute_file_path` occurs in `runner_id`, everything after its last
///   occurrence is appended verbatim to `absolute_file_path` (`/proj/test_a.py` + `::TestC::test_x`). Otherwise the
///   id, stripped of leading `.` characters, is joined onto the directory of `absolute_file_path`.
///
/// ## Notes
/// - The file name lookup is case-sensitive.
/// - The fallback covers runner ids expressed relative to a different base than the resolved source path.
/// - A fallback id starting with `./` keeps its separator once the dots are trimmed, so it is rooted and replaces
///   the directory (`./tests/Test_A.py::t` yields `/tests/Test_A.py::t`).
pub fn execution_path(absolute_file_path: &str, runner_id: &str) -> String {
    let name = file_name(absolute_file_path);
    let index = if name.is_empty() { None } else { runner_id.rfind(name) };

    match index {
        Some(index) => format!("{absolute_file_path}{}", &runner_id[index + name.len()..]),
        None => join(parent_dir(absolute_file_path), runner_id.trim_start_matches('.')),
    }
}
