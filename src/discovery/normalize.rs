//! Turn raw discovery batches into normalized test cases.
//!
//! ## Degrade policy
//!
//! A test that cannot be normalized (malformed `source`, blank `name` or `id`) is skipped: it is recorded as a
//! [`ParseFailure`], logged, and handed to the sink's failure hook. Nothing a single test contains can stop the
//! remaining tests or batches from being processed.
//!
//! ## Source paths
//!
//! `source_path` is lowercased after resolution. Downstream matching assumes a case-insensitive filesystem; on a
//! case-sensitive one, two files differing only in case collapse onto the same key.

use pytest_discovery_core::{execution_path, fully_qualified_name_from_id, parse_source, paths};
use tracing::{debug, info, warn};

use super::errors::DiscoveryError;
use super::model::{DiscoveryBatch, NormalizedTestCase, RawTest};
use super::parents::ParentMap;
use super::sink::DiscoverySink;
use crate::settings::AdapterSettings;

/// A test that was skipped during normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    /// Root of the batch the test came from
    pub root: String,
    pub runner_id: String,
    pub error: DiscoveryError,
}

/// Everything one normalization pass produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryOutput {
    /// Records in emission order (batch order, then test order)
    pub test_cases: Vec<NormalizedTestCase>,
    pub failures: Vec<ParseFailure>,
}

/// Result of [`normalize_batches`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeOutcome {
    /// No batches were supplied: discovery never ran.
    NoInput,
    /// Discovery ran. The output may still hold zero test cases.
    Completed(DiscoveryOutput),
}

impl NormalizeOutcome {
    pub fn is_no_input(&self) -> bool {
        matches!(self, NormalizeOutcome::NoInput)
    }

    pub fn output(&self) -> Option<&DiscoveryOutput> {
        match self {
            NormalizeOutcome::NoInput => None,
            NormalizeOutcome::Completed(output) => Some(output),
        }
    }

    pub fn into_output(self) -> Option<DiscoveryOutput> {
        match self {
            NormalizeOutcome::NoInput => None,
            NormalizeOutcome::Completed(output) => Some(output),
        }
    }

    /// Emitted records; empty for `NoInput`.
    pub fn test_cases(&self) -> &[NormalizedTestCase] {
        match self {
            NormalizeOutcome::NoInput => &[],
            NormalizeOutcome::Completed(output) => &output.test_cases,
        }
    }
}

/// Normalize a single test from a batch rooted at `root`.
///
/// ## Errors
/// - `MalformedSource` when `test.source` is not `<path>:<line>`.
/// - `EmptyRequiredField` when `test.name` or `test.id` is blank.
pub fn normalize_test(
    test: &RawTest,
    root: &str,
    parents: &ParentMap<'_>,
    settings: &AdapterSettings,
) -> Result<NormalizedTestCase, DiscoveryError> {
    let location = parse_source(&test.source).map_err(|reason| DiscoveryError::MalformedSource {
        raw: test.source.clone(),
        reason,
    })?;
    if test.name.trim().is_empty() {
        return Err(DiscoveryError::EmptyRequiredField { field: "name" });
    }
    if test.id.trim().is_empty() {
        return Err(DiscoveryError::EmptyRequiredField { field: "id" });
    }

    let source_path = paths::join(root, location.path).to_lowercase();
    let execution_path = execution_path(&source_path, &test.id);

    Ok(NormalizedTestCase {
        fully_qualified_name: fully_qualified_name_from_id(&test.id),
        display_name: test.name.clone(),
        source_path,
        line_number: location.line,
        runner_id: test.id.clone(),
        xml_class_name: parents.xml_class_name(test),
        execution_path,
        is_workspace: settings.is_workspace,
        executor_uri: settings.executor_uri.clone(),
    })
}

/// Normalize every test of every batch, pushing each record to `sink` as soon as it is built.
///
/// ## Returns
/// - `NoInput` when `batches` is empty.
/// - `Completed` otherwise, with records and failures in input order.
#[tracing::instrument(skip_all, fields(batch_count = batches.len()))]
pub fn normalize_batches<S>(batches: &[DiscoveryBatch], settings: &AdapterSettings, sink: &mut S) -> NormalizeOutcome
where
    S: DiscoverySink + ?Sized,
{
    if batches.is_empty() {
        debug!("no discovery batches to normalize");
        return NormalizeOutcome::NoInput;
    }

    info!("Discovered the following tests:");

    let mut output = DiscoveryOutput::default();
    for batch in batches {
        sink.on_batch_start(&batch.root);
        let parents = ParentMap::build(batch);

        for test in &batch.tests {
            match normalize_test(test, &batch.root, &parents, settings) {
                Ok(test_case) => {
                    info!(
                        "{} Source:{} Line:{}",
                        test_case.display_name,
                        test_case.source_path,
                        test_case.line_number
                    );
                    sink.send_test_case(&test_case);
                    output.test_cases.push(test_case);
                }
                Err(error) => {
                    warn!(id = %test.id, "test case parse failed: {}", error);
                    let failure = ParseFailure {
                        root: batch.root.clone(),
                        runner_id: test.id.clone(),
                        error,
                    };
                    sink.on_parse_failure(&failure);
                    output.failures.push(failure);
                }
            }
        }
    }

    NormalizeOutcome::Completed(output)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pytest_discovery_core::SourceError;

    use super::*;
    use crate::discovery::model::RawParent;
    use crate::discovery::sink::NullSink;

    fn class_batch() -> DiscoveryBatch {
        DiscoveryBatch::new("/Proj")
            .with_parent(RawParent::new("./tests", Some("."), "folder", "tests"))
            .with_parent(RawParent::new("./tests/test_a.py", Some("./tests"), "file", "test_a.py"))
            .with_parent(RawParent::new(
                "./tests/test_a.py::TestC",
                Some("./tests/test_a.py"),
                "suite",
                "TestC",
            ))
            .with_test(RawTest::new(
                "./tests/test_a.py::TestC::test_x",
                "./tests/test_a.py::TestC",
                "test_x",
                "./tests/test_a.py:5",
            ))
    }

    #[derive(Default)]
    struct RecordingSink {
        events: Vec<String>,
    }

    impl DiscoverySink for RecordingSink {
        fn on_batch_start(&mut self, root: &str) {
            self.events.push(format!("batch {root}"));
        }

        fn send_test_case(&mut self, test_case: &NormalizedTestCase) {
            self.events.push(format!("case {}", test_case.display_name));
        }

        fn on_parse_failure(&mut self, failure: &ParseFailure) {
            self.events.push(format!("failure {}", failure.runner_id));
        }
    }

    #[test]
    fn test_normalize_test_class_member() {
        let batch = class_batch();
        let parents = ParentMap::build(&batch);
        let case = normalize_test(&batch.tests[0], &batch.root, &parents, &AdapterSettings::default()).unwrap();

        assert_eq!(case.fully_qualified_name, "tests/test_a.py::TestC::test_x");
        assert_eq!(case.display_name, "test_x");
        assert_eq!(case.source_path, "/proj/tests/test_a.py");
        assert_eq!(case.line_number, 5);
        assert_eq!(case.runner_id, "./tests/test_a.py::TestC::test_x");
        assert_eq!(case.xml_class_name, "tests.test_a.TestC");
        assert_eq!(case.execution_path, "/proj/tests/test_a.py::TestC::test_x");
        assert!(!case.is_workspace);
    }

    #[test]
    fn test_normalize_test_module_function() {
        let batch = DiscoveryBatch::new("/proj")
            .with_parent(RawParent::new("./test_b.py", Some("."), "file", "test_b.py"))
            .with_test(RawTest::new("./test_b.py::test_y", "./test_b.py", "test_y", "./test_b.py:2"));
        let parents = ParentMap::build(&batch);
        let case = normalize_test(&batch.tests[0], &batch.root, &parents, &AdapterSettings::default()).unwrap();

        assert_eq!(case.fully_qualified_name, "test_b.py::test_b::test_y");
        assert_eq!(case.xml_class_name, "test_b");
        assert_eq!(case.execution_path, "/proj/test_b.py::test_y");
    }

    #[test]
    fn test_normalize_test_absolute_source_keeps_own_root() {
        let batch = DiscoveryBatch::new("/proj")
            .with_test(RawTest::new("test_c.py::test_z", "x", "test_z", "/Other/test_c.py:8"));
        let parents = ParentMap::build(&batch);
        let case = normalize_test(&batch.tests[0], &batch.root, &parents, &AdapterSettings::default()).unwrap();

        assert_eq!(case.source_path, "/other/test_c.py");
        assert_eq!(case.xml_class_name, "");
    }

    #[test]
    fn test_normalize_test_copies_settings() {
        let batch = class_batch();
        let parents = ParentMap::build(&batch);
        let settings = AdapterSettings::for_workspace().with_executor_uri("executor://Custom/v1");
        let case = normalize_test(&batch.tests[0], &batch.root, &parents, &settings).unwrap();

        assert!(case.is_workspace);
        assert_eq!(case.executor_uri, "executor://Custom/v1");
    }

    #[test]
    fn test_normalize_test_malformed_source() {
        let parents = ParentMap::default();
        let test = RawTest::new("test_a.py::test_x", "p", "test_x", "test_a.py");
        let err = normalize_test(&test, "/proj", &parents, &AdapterSettings::default()).unwrap_err();

        assert_eq!(
            err,
            DiscoveryError::MalformedSource {
                raw: "test_a.py".to_string(),
                reason: SourceError::MissingSeparator,
            }
        );
    }

    #[test]
    fn test_normalize_test_blank_name() {
        let parents = ParentMap::default();
        let test = RawTest::new("test_a.py::test_x", "p", "  ", "test_a.py:1");
        let err = normalize_test(&test, "/proj", &parents, &AdapterSettings::default()).unwrap_err();
        assert_eq!(err, DiscoveryError::EmptyRequiredField { field: "name" });
    }

    #[test]
    fn test_normalize_test_blank_id() {
        let parents = ParentMap::default();
        let test = RawTest::new("", "p", "test_x", "test_a.py:1");
        let err = normalize_test(&test, "/proj", &parents, &AdapterSettings::default()).unwrap_err();
        assert_eq!(err, DiscoveryError::EmptyRequiredField { field: "id" });
    }

    #[test]
    fn test_normalize_batches_no_input() {
        let outcome = normalize_batches(&[], &AdapterSettings::default(), &mut NullSink);
        assert!(outcome.is_no_input());
        assert!(outcome.output().is_none());
        assert!(outcome.test_cases().is_empty());
    }

    #[test]
    fn test_normalize_batches_found_nothing_is_not_no_input() {
        let batches = vec![DiscoveryBatch::new("/proj")];
        let outcome = normalize_batches(&batches, &AdapterSettings::default(), &mut NullSink);
        assert!(!outcome.is_no_input());
        assert_eq!(outcome.into_output(), Some(DiscoveryOutput::default()));
    }

    #[test]
    fn test_normalize_batches_skips_malformed_and_keeps_order() {
        let batch = DiscoveryBatch::new("/proj")
            .with_test(RawTest::new("test_a.py::test_1", "p", "test_1", "test_a.py:1"))
            .with_test(RawTest::new("test_a.py::test_2", "p", "test_2", "test_a.py:two"))
            .with_test(RawTest::new("test_a.py::test_3", "p", "test_3", "test_a.py:3"))
            .with_test(RawTest::new("test_a.py::test_4", "p", "test_4", "test_a.py:4"));
        let mut sink = RecordingSink::default();
        let output = normalize_batches(&[batch], &AdapterSettings::default(), &mut sink)
            .into_output()
            .unwrap();

        let names: Vec<&str> = output.test_cases.iter().map(|c| c.display_name.as_str()).collect();
        assert_eq!(names, vec!["test_1", "test_3", "test_4"]);
        assert_eq!(output.failures.len(), 1);
        assert_eq!(output.failures[0].runner_id, "test_a.py::test_2");
        assert_eq!(
            sink.events,
            vec![
                "batch /proj",
                "case test_1",
                "failure test_a.py::test_2",
                "case test_3",
                "case test_4",
            ]
        );
    }

    #[test]
    fn test_normalize_batches_scopes_parents_per_batch() {
        let first = DiscoveryBatch::new("/one")
            .with_parent(RawParent::new("shared", None, "file", "test_one.py"))
            .with_test(RawTest::new("test_one.py::test_x", "shared", "test_x", "test_one.py:1"));
        let second = DiscoveryBatch::new("/two")
            .with_test(RawTest::new("test_two.py::test_y", "shared", "test_y", "test_two.py:1"));
        let outcome = normalize_batches(&[first, second], &AdapterSettings::default(), &mut NullSink);

        let classes: Vec<&str> = outcome.test_cases().iter().map(|c| c.xml_class_name.as_str()).collect();
        assert_eq!(classes, vec!["test_one", ""]);
    }

    #[test]
    fn test_normalize_batches_is_deterministic() {
        let batches = vec![class_batch(), class_batch()];
        let settings = AdapterSettings::default();
        let first = normalize_batches(&batches, &settings, &mut NullSink);
        let second = normalize_batches(&batches, &settings, &mut NullSink);
        assert_eq!(first, second);
    }

    #[test]
    fn test_normalize_batches_pushes_same_records_it_returns() {
        let batches = vec![class_batch()];
        let mut sink: Vec<NormalizedTestCase> = Vec::new();
        let outcome = normalize_batches(&batches, &AdapterSettings::default(), &mut sink);
        assert_eq!(sink.as_slice(), outcome.test_cases());
    }
}
