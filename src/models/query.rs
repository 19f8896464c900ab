// Captured control command outcome

/// One invocation of the control command. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    /// -1 when the child was terminated by a signal.
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl QueryResult {
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}
