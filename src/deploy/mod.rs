// ABOUTME: Deployment orchestration using the type state pattern.
// ABOUTME: Exports state markers, the Deployment struct and the full pipeline run.

mod access;
mod deployment;
mod error;
mod outcome;
pub mod pipeline;
mod provision;
mod state;
mod transitions;

pub use access::{planned_grants, reconcile_permissions};
pub use deployment::Deployment;
pub use error::{DeployError, DeployErrorKind, RollbackStep, SyncStep};
pub use outcome::{
    Activation, DeployReport, HealthState, PermissionReport, PermissionResult, ProvisionReport,
    StepLog, StepOutcome,
};
pub use provision::provision_dependencies;
pub use state::{
    Activated, Anchored, Completed, Initialized, Preflighted, Provisioned, Reconciled, Revisions,
    RolledBack, Rollbackable, Synced, Verified,
};
pub use transitions::TransitionResult;
