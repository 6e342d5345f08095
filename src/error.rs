// ABOUTME: Application-wide error types for gitship.
// ABOUTME: Uses thiserror for ergonomic error handling and maps errors to exit codes.

use thiserror::Error;

use crate::deploy::{DeployError, DeployErrorKind};
use crate::history::HistoryError;
use crate::types::{BranchNameError, ServiceNameError};

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid branch name: {0}")]
    InvalidBranch(#[from] BranchNameError),

    #[error("invalid service name: {0}")]
    InvalidService(#[from] ServiceNameError),

    #[error("invalid health host: {0:?}")]
    InvalidHost(String),

    #[error(transparent)]
    Deploy(#[from] DeployError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit status for this error.
    ///
    /// 2 means the rollback itself failed and the host needs attention;
    /// every other failure exits 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Deploy(e) if e.kind() == DeployErrorKind::UnknownState => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
