//! Adapter settings attached to every normalized test case.
//!
//! Loading these from a project or workspace is the host's job; this is only the value type.

/// Executor that runs tests for a project-based host.
pub const PROJECT_EXECUTOR_URI: &str = "executor://PythonPyTestExecutor/v1";

/// Executor that runs tests for an open-folder (workspace) host.
pub const WORKSPACE_EXECUTOR_URI: &str = "executor://PythonWorkspacePyTestExecutor/v1";

/// Host settings copied verbatim onto each record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterSettings {
    /// Whether discovery ran for a workspace rather than a project
    pub is_workspace: bool,
    /// Identity of the executor that will later run the discovered tests
    pub executor_uri: String,
}

impl Default for AdapterSettings {
    fn default() -> Self {
        Self::for_project()
    }
}

impl AdapterSettings {
    /// Create settings with default (project) values
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings for a project host, using the project executor
    pub fn for_project() -> Self {
        Self {
            is_workspace: false,
            executor_uri: PROJECT_EXECUTOR_URI.to_string(),
        }
    }

    /// Settings for a workspace host, using the workspace executor
    pub fn for_workspace() -> Self {
        Self {
            is_workspace: true,
            executor_uri: WORKSPACE_EXECUTOR_URI.to_string(),
        }
    }

    /// Set the workspace flag without touching the executor
    pub fn with_workspace(mut self, is_workspace: bool) -> Self {
        self.is_workspace = is_workspace;
        self
    }

    /// Override the executor identity
    pub fn with_executor_uri(mut self, uri: impl Into<String>) -> Self {
        self.executor_uri = uri.into();
        self
    }
}
