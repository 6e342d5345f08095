// ABOUTME: Tool discovery trait used by the preflight gate.
// ABOUTME: Answers whether an executable is reachable without running it.

use async_trait::async_trait;
use std::path::PathBuf;

/// Finds executables by name.
#[async_trait]
pub trait ToolLocator: Send + Sync {
    /// Full path of `program` if it can be executed, None otherwise.
    async fn locate(&self, program: &str) -> Option<PathBuf>;
}
