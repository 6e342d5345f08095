// ABOUTME: Generic deployment struct parameterized by state marker.
// ABOUTME: State types carry their own data for compile-time guarantees.

use crate::context::DeployContext;
use crate::history::DeployRecord;
use crate::types::{BranchName, Revision, ServiceName};

use super::outcome::{DeployReport, StepLog};
use super::state::{Anchored, Completed, Initialized, RolledBack, Rollbackable, Verified};

/// A deployment in progress, parameterized by its current state.
///
/// The state type parameter `S` carries state-specific data (the anchor
/// revision, then the anchor and deployed pair) directly in the state type.
/// This makes it impossible to roll back before an anchor exists, or after
/// local health has been confirmed.
#[derive(Debug)]
pub struct Deployment<S> {
    pub(crate) ctx: DeployContext,
    pub(crate) steps: StepLog,
    pub(crate) state: S,
}

impl Deployment<Initialized> {
    /// Start a deployment of `ctx.branch` into `ctx.app_dir`.
    pub fn new(ctx: DeployContext) -> Self {
        Deployment {
            ctx,
            steps: StepLog::default(),
            state: Initialized,
        }
    }
}

impl<S> Deployment<S> {
    pub fn context(&self) -> &DeployContext {
        &self.ctx
    }

    pub fn branch(&self) -> &BranchName {
        &self.ctx.branch
    }

    pub fn service(&self) -> &ServiceName {
        &self.ctx.service
    }

    /// Results of the steps taken so far.
    pub fn steps(&self) -> &StepLog {
        &self.steps
    }

    pub(crate) fn transition<T>(self, state: T) -> Deployment<T> {
        Deployment {
            ctx: self.ctx,
            steps: self.steps,
            state,
        }
    }
}

impl Deployment<Anchored> {
    /// Revision checked out before the run changed anything.
    pub fn anchor(&self) -> &Revision {
        &self.state.anchor
    }
}

impl<S: Rollbackable> Deployment<S> {
    pub fn anchor(&self) -> &Revision {
        &self.state.revisions().anchor
    }

    pub fn deployed(&self) -> &Revision {
        &self.state.revisions().deployed
    }
}

impl Deployment<Verified> {
    pub fn deployed(&self) -> &Revision {
        &self.state.revisions.deployed
    }
}

impl Deployment<Completed> {
    /// The history entry, if it was written.
    pub fn record(&self) -> Option<&DeployRecord> {
        self.state.record.as_ref()
    }

    pub fn into_report(self) -> DeployReport {
        DeployReport {
            branch: self.ctx.branch,
            revisions: self.state.revisions,
            steps: self.steps,
            record: self.state.record,
        }
    }
}

impl Deployment<RolledBack> {
    /// Revision the checkout was returned to.
    pub fn restored(&self) -> &Revision {
        &self.state.anchor
    }
}
