// ABOUTME: Outcomes of the tolerant deploy steps and the final run report.
// ABOUTME: Non-fatal failures are values here, never errors.

use serde::Serialize;
use std::path::PathBuf;

use crate::history::DeployRecord;
use crate::tools::{AclGrant, ProbeOutcome};
use crate::types::BranchName;

use super::state::Revisions;

/// What happened to one tolerant step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum StepOutcome {
    Applied,
    Skipped(String),
    FailedNonFatal(String),
}

impl StepOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, StepOutcome::FailedNonFatal(_))
    }
}

/// Dependency provisioning, one outcome per sub-step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionReport {
    /// Environment creation; skipped when one already exists.
    pub environment: StepOutcome,
    /// Installer self-upgrade.
    pub installer: StepOutcome,
    /// Manifest install; skipped when there is no manifest.
    pub dependencies: StepOutcome,
}

impl ProvisionReport {
    pub fn has_failures(&self) -> bool {
        [&self.environment, &self.installer, &self.dependencies]
            .into_iter()
            .any(StepOutcome::is_failure)
    }
}

/// One ACL grant attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionResult {
    pub path: PathBuf,
    pub grant: AclGrant,
    pub outcome: StepOutcome,
}

/// Every grant attempted during reconciliation, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PermissionReport {
    pub results: Vec<PermissionResult>,
}

impl PermissionReport {
    pub fn applied(&self) -> usize {
        self.count(|o| matches!(o, StepOutcome::Applied))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, StepOutcome::Skipped(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(StepOutcome::is_failure)
    }

    fn count(&self, pred: impl Fn(&StepOutcome) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.outcome)).count()
    }
}

/// How the service picked up the new code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    /// Graceful reload succeeded.
    Reloaded,
    /// Reload failed; a full restart succeeded.
    Restarted,
}

/// Health knowledge about the deployed revision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    #[default]
    Unverified,
    LocalHealthy,
    LocalUnhealthyRolledBack,
    PublicHealthy,
    PublicUnhealthyTolerated,
}

/// Step results accumulated as a deployment moves through its states.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StepLog {
    pub provisioning: Option<ProvisionReport>,
    pub permissions: Option<PermissionReport>,
    pub activation: Option<Activation>,
    pub health: HealthState,
    pub public_probe: Option<ProbeOutcome>,
}

/// Summary of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct DeployReport {
    pub branch: BranchName,
    pub revisions: Revisions,
    #[serde(flatten)]
    pub steps: StepLog,
    pub record: Option<DeployRecord>,
}
