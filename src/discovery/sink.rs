//! Push-style receivers for normalized test cases.
//!
//! The normalizer hands every record to a `DiscoverySink` as soon as it is built, before the next test is
//! looked at. Implement the trait to feed a test explorer, stream records over IPC, or print them.

use super::model::NormalizedTestCase;
use super::normalize::ParseFailure;

/// Receiver for records produced during normalization.
pub trait DiscoverySink {
    /// Called before the tests of a batch are normalized
    fn on_batch_start(&mut self, _root: &str) {}

    /// Called once per successfully normalized test, in emission order
    fn send_test_case(&mut self, test_case: &NormalizedTestCase);

    /// Called when a test is skipped because it could not be normalized
    fn on_parse_failure(&mut self, _failure: &ParseFailure) {}
}

/// Sink that drops everything (no explorer attached).
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiscoverySink for NullSink {
    fn send_test_case(&mut self, _test_case: &NormalizedTestCase) {}
}

impl DiscoverySink for Vec<NormalizedTestCase> {
    fn send_test_case(&mut self, test_case: &NormalizedTestCase) {
        self.push(test_case.clone());
    }
}

/// Console sink: one line per record as it arrives.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    pub verbose: bool,
}

impl ConsoleSink {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl DiscoverySink for ConsoleSink {
    fn on_batch_start(&mut self, root: &str) {
        if self.verbose {
            println!("\x1b[1m{}\x1b[0m", root);
        }
    }

    fn send_test_case(&mut self, test_case: &NormalizedTestCase) {
        println!("{}", format_test_case(test_case, self.verbose));
    }

    fn on_parse_failure(&mut self, failure: &ParseFailure) {
        if self.verbose {
            eprintln!("\x1b[33mSKIPPED\x1b[0m {} ({})", failure.runner_id, failure.error);
        }
    }
}

/// Render a record the way `ConsoleSink` prints it.
pub fn format_test_case(test_case: &NormalizedTestCase, verbose: bool) -> String {
    let mut line = format!(
        "{} {}:{}",
        test_case.fully_qualified_name,
        test_case.source_path,
        test_case.line_number
    );
    if verbose {
        line.push_str(&format!("\n    class: {}", test_case.xml_class_name));
        line.push_str(&format!("\n    run:   {}", test_case.execution_path));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_case(name: &str) -> NormalizedTestCase {
        NormalizedTestCase {
            fully_qualified_name: format!("test_a.py::test_a::{name}"),
            display_name: name.to_string(),
            source_path: "/proj/test_a.py".to_string(),
            line_number: 3,
            runner_id: format!("test_a.py::{name}"),
            xml_class_name: "test_a".to_string(),
            execution_path: format!("/proj/test_a.py::{name}"),
            is_workspace: false,
            executor_uri: "executor://test/v1".to_string(),
        }
    }

    #[test]
    fn test_vec_sink_collects_in_order() {
        let mut sink: Vec<NormalizedTestCase> = Vec::new();
        sink.send_test_case(&sample_case("test_x"));
        sink.send_test_case(&sample_case("test_y"));
        let names: Vec<&str> = sink.iter().map(|c| c.display_name.as_str()).collect();
        assert_eq!(names, vec!["test_x", "test_y"]);
    }

    #[test]
    fn test_format_test_case_compact() {
        assert_eq!(
            format_test_case(&sample_case("test_x"), false),
            "test_a.py::test_a::test_x /proj/test_a.py:3"
        );
    }

    #[test]
    fn test_format_test_case_verbose() {
        let rendered = format_test_case(&sample_case("test_x"), true);
        assert_eq!(
            rendered,
            "test_a.py::test_a::test_x /proj/test_a.py:3\n    class: test_a\n    run:   /proj/test_a.py::test_x"
        );
    }
}
