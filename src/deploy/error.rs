// ABOUTME: Error types for deployment operations.
// ABOUTME: Covers preflight, source sync, activation, health and rollback failures.

use std::fmt;
use std::path::PathBuf;

use crate::tools::{ProbeOutcome, ToolError};
use crate::types::Revision;

/// Which part of the source sync failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStep {
    Fetch,
    InspectBranch,
    Checkout,
    Reset,
    ReadBack,
}

impl SyncStep {
    /// Whether the working tree may have moved by the time this step failed.
    pub fn touched_checkout(self) -> bool {
        matches!(
            self,
            SyncStep::Checkout | SyncStep::Reset | SyncStep::ReadBack
        )
    }
}

impl fmt::Display for SyncStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyncStep::Fetch => "fetch",
            SyncStep::InspectBranch => "branch lookup",
            SyncStep::Checkout => "checkout",
            SyncStep::Reset => "reset",
            SyncStep::ReadBack => "revision read-back",
        };
        f.write_str(name)
    }
}

/// Which part of a rollback failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollbackStep {
    Reset,
    Restart,
}

impl fmt::Display for RollbackStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RollbackStep::Reset => f.write_str("source reset"),
            RollbackStep::Restart => f.write_str("service restart"),
        }
    }
}

/// Errors that can occur during deployment state transitions.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// A required executable is not on PATH.
    #[error("required tool '{program}' ({role}) not found on PATH")]
    MissingTool {
        program: &'static str,
        role: &'static str,
    },

    /// The application directory is not a version-controlled checkout.
    #[error("{} is not a git working tree", .0.display())]
    NotARepository(PathBuf),

    /// The current revision could not be read before any change.
    #[error("could not determine current revision: {0}")]
    AnchorCapture(#[source] ToolError),

    /// Fetching or aligning the source failed.
    #[error("source sync failed during {step}: {source}")]
    SyncFailed {
        step: SyncStep,
        #[source]
        source: ToolError,
    },

    /// Neither reload nor restart brought the service up.
    #[error("service activation failed (reload: {reload}; restart: {restart})")]
    ActivationFailed { reload: String, restart: String },

    /// The application did not answer healthily on its local listener.
    #[error("local health check failed: {0}")]
    LocalHealthFailed(ProbeOutcome),

    /// Recovery itself failed; source and service state are unknown.
    #[error("rollback to {anchor} failed during {step}: {source}; deployment is in an unknown state")]
    RollbackFailed {
        anchor: Revision,
        step: RollbackStep,
        #[source]
        source: ToolError,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployErrorKind {
    /// Preflight found the host unfit; nothing was touched.
    Preflight,
    /// Source sync failed; the checkout was put back on a best-effort basis.
    Sync,
    /// Activation failed and the previous revision was restored.
    Activation,
    /// Local health failed and the previous revision was restored.
    Health,
    /// Rollback failed; manual intervention needed.
    UnknownState,
}

impl DeployError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> DeployErrorKind {
        match self {
            DeployError::MissingTool { .. }
            | DeployError::NotARepository(_)
            | DeployError::AnchorCapture(_) => DeployErrorKind::Preflight,
            DeployError::SyncFailed { .. } => DeployErrorKind::Sync,
            DeployError::ActivationFailed { .. } => DeployErrorKind::Activation,
            DeployError::LocalHealthFailed(_) => DeployErrorKind::Health,
            DeployError::RollbackFailed { .. } => DeployErrorKind::UnknownState,
        }
    }

    pub(crate) fn sync(step: SyncStep) -> impl FnOnce(ToolError) -> Self {
        move |source| DeployError::SyncFailed { step, source }
    }
}
