//! Discovery report shapes and the normalized test case record.

use serde::{Deserialize, Deserializer, Serialize};

/// Parent kind whose name never contributes to a JUnit class name.
pub const FUNCTION_KIND: &str = "function";

/// Output of one discovery invocation (typically one project root).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DiscoveryBatch {
    /// Absolute directory that relative test sources resolve against.
    pub root: String,
    #[serde(default)]
    pub tests: Vec<RawTest>,
    #[serde(default)]
    pub parents: Vec<RawParent>,
}

impl DiscoveryBatch {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            tests: Vec::new(),
            parents: Vec::new(),
        }
    }

    pub fn with_test(mut self, test: RawTest) -> Self {
        self.tests.push(test);
        self
    }

    pub fn with_parent(mut self, parent: RawParent) -> Self {
        self.parents.push(parent);
        self
    }
}

/// A container node (folder, file, class, parametrized function) in the discovery tree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawParent {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    /// `None` for top-level nodes.
    #[serde(rename = "parentid", default)]
    pub parent_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

impl RawParent {
    pub fn new(
        id: impl Into<String>,
        parent_id: Option<&str>,
        kind: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            parent_id: parent_id.map(str::to_string),
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Whether this node is a (parametrized) test function rather than a container.
    pub fn is_function(&self) -> bool {
        self.kind.eq_ignore_ascii_case(FUNCTION_KIND)
    }
}

/// A single discovered test as the runner reports it.
///
/// Missing or `null` string fields deserialize as empty so that one incomplete entry is rejected on its own instead
/// of failing the whole report.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawTest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(rename = "parentid", default, deserialize_with = "null_as_empty")]
    pub parent_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// `<path>:<line>`
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source: String,
}

impl RawTest {
    pub fn new(
        id: impl Into<String>,
        parent_id: impl Into<String>,
        name: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            parent_id: parent_id.into(),
            name: name.into(),
            source: source.into(),
        }
    }
}

/// Read a string that the runner may write as `null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A discovered test, resolved into the identifiers the test explorer and result matching need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedTestCase {
    /// Stable key across discovery runs (`file::class::test`).
    pub fully_qualified_name: String,
    pub display_name: String,
    /// Absolute, lowercased path of the defining file.
    pub source_path: String,
    pub line_number: u32,
    /// The runner id, kept verbatim for re-invocation.
    pub runner_id: String,
    /// Dotted container chain, as the JUnit report spells `classname`.
    pub xml_class_name: String,
    pub execution_path: String,
    pub is_workspace: bool,
    pub executor_uri: String,
}
