// ABOUTME: Version-control operations trait for the application checkout.
// ABOUTME: Capture, fetch, branch switching and destructive reset.

use async_trait::async_trait;
use std::path::Path;

use crate::tools::ToolError;
use crate::types::{BranchName, Revision};

/// Version control over a single working directory.
#[async_trait]
pub trait VersionControl: Send + Sync {
    /// Whether `dir` lies inside a work tree.
    async fn is_repository(&self, dir: &Path) -> bool;

    /// Revision currently checked out.
    async fn current_revision(&self, dir: &Path) -> Result<Revision, ToolError>;

    /// Fetch updates from every remote.
    async fn fetch_all(&self, dir: &Path) -> Result<(), ToolError>;

    /// Whether a local branch with this name exists.
    async fn local_branch_exists(&self, dir: &Path, branch: &BranchName)
    -> Result<bool, ToolError>;

    /// Switch to an existing local branch.
    async fn checkout(&self, dir: &Path, branch: &BranchName) -> Result<(), ToolError>;

    /// Create a local branch tracking `upstream` and switch to it.
    async fn checkout_tracking(
        &self,
        dir: &Path,
        branch: &BranchName,
        upstream: &str,
    ) -> Result<(), ToolError>;

    /// Discard local state and point the current branch at `target`.
    async fn reset_hard(&self, dir: &Path, target: &str) -> Result<(), ToolError>;
}
