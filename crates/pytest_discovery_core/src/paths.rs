//! Separator-agnostic path helpers.
//!
//! Discovery reports are produced on whatever platform the runner executed on, so both `/` and `\` are treated as
//! directory separators here regardless of the host. Everything operates on `&str` and never touches the
//! filesystem.

/// Characters accepted as directory separators.
pub const SEPARATORS: &[char] = &['/', '\\'];

/// Relative-path prefixes the runner emits in front of project-relative paths.
pub const RELATIVE_MARKERS: [&str; 2] = ["./", ".\\"];

/// Strip every leading `./` or `.\` marker from `path`.
///
/// ## Examples
/// ```rust
/// use pytest_discovery_core::paths::strip_relative_marker;
/// assert_eq!(strip_relative_marker("./tests/test_a.py"), "tests/test_a.py");
/// assert_eq!(strip_relative_marker(".\\.\\test_a.py"), "test_a.py");
/// assert_eq!(strip_relative_marker("../test_a.py"), "../test_a.py");
/// ```
pub fn strip_relative_marker(path: &str) -> &str {
    let mut rest = path;
    while let Some(stripped) = RELATIVE_MARKERS.iter().find_map(|marker| rest.strip_prefix(marker)) {
        rest = stripped;
    }
    rest
}

/// Return the final component of `path` (everything after the last separator).
pub fn file_name(path: &str) -> &str {
    match path.rfind(SEPARATORS) {
        Some(index) => &path[index + 1..],
        None => path,
    }
}

/// Return the file name of `path` without its extension.
///
/// The extension is everything from the last `.` of the file name, so `pkg.mod.py` yields `pkg.mod` and a name
/// without a dot is returned unchanged.
///
/// ## Examples
/// ```rust
/// use pytest_discovery_core::paths::file_stem;
/// assert_eq!(file_stem("tests/test_math.py"), "test_math");
/// assert_eq!(file_stem("TestCalculator"), "TestCalculator");
/// ```
pub fn file_stem(path: &str) -> &str {
    let name = file_name(path);
    match name.rfind('.') {
        Some(index) => &name[..index],
        None => name,
    }
}

/// Return the directory portion of `path`, or `""` when it has none.
///
/// A path directly under the root keeps its root separator (`/a.py` yields `/`).
pub fn parent_dir(path: &str) -> &str {
    match path.rfind(SEPARATORS) {
        Some(0) => &path[..1],
        Some(index) => &path[..index],
        None => "",
    }
}

/// Whether `path` is absolute on either a Unix-like or a Windows host.
pub fn is_absolute(path: &str) -> bool {
    if path.starts_with(SEPARATORS) {
        return true;
    }
    let bytes = path.as_bytes();
    bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && matches!(bytes[2], b'/' | b'\\')
}

/// Join `tail` onto `base`.
///
/// An absolute `tail` replaces `base`. The separator already used by `base` is reused, defaulting to `/`.
pub fn join(base: &str, tail: &str) -> String {
    if base.is_empty() || is_absolute(tail) {
        return tail.to_string();
    }
    if base.ends_with(SEPARATORS) {
        return format!("{base}{tail}");
    }
    let separator = if base.contains('\\') && !base.contains('/') { '\\' } else { '/' };
    format!("{base}{separator}{tail}")
}
