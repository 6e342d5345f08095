// ABOUTME: State transition methods for deployment orchestration.
// ABOUTME: Each method consumes self and returns the next state on success.

use std::time::Duration;

use crate::diagnostics::{Diagnostics, Warning};
use crate::history::{DeployRecord, HistoryLog};
use crate::tools::{
    HttpProbe, PackageInstaller, PermissionManager, ProbeOutcome, ServiceSupervisor, ToolError,
    ToolLocator, VersionControl,
};
use crate::types::Revision;

use super::Deployment;
use super::access::reconcile_permissions;
use super::error::{DeployError, RollbackStep, SyncStep};
use super::outcome::{Activation, HealthState};
use super::provision::provision_dependencies;
use super::state::{
    Activated, Anchored, Completed, Initialized, Preflighted, Provisioned, Reconciled, Revisions,
    RolledBack, Rollbackable, Synced, Verified,
};

/// Result type for transitions that may need rollback on failure.
pub type TransitionResult<T, S> = Result<Deployment<T>, (Deployment<S>, DeployError)>;

// =============================================================================
// Initialized -> Preflighted
// =============================================================================

impl Deployment<Initialized> {
    /// Check that every required tool is reachable and that the application
    /// directory is a checkout. Performs no mutation.
    ///
    /// # Errors
    ///
    /// `MissingTool` for the first absent executable, `NotARepository` when
    /// the directory is missing or not a work tree.
    pub async fn preflight<L, V>(
        self,
        locator: &L,
        vcs: &V,
    ) -> Result<Deployment<Preflighted>, DeployError>
    where
        L: ToolLocator + ?Sized,
        V: VersionControl + ?Sized,
    {
        for tool in &self.ctx.required_tools {
            match locator.locate(tool.program).await {
                Some(path) => {
                    tracing::debug!(program = tool.program, path = %path.display(), "found tool")
                }
                None => {
                    return Err(DeployError::MissingTool {
                        program: tool.program,
                        role: tool.role,
                    });
                }
            }
        }

        let dir = &self.ctx.app_dir;
        if !dir.is_dir() || !vcs.is_repository(dir).await {
            return Err(DeployError::NotARepository(dir.clone()));
        }

        Ok(self.transition(Preflighted))
    }
}

// =============================================================================
// Preflighted -> Anchored
// =============================================================================

impl Deployment<Preflighted> {
    /// Record the revision currently checked out, before anything changes.
    pub async fn capture_anchor<V: VersionControl + ?Sized>(
        self,
        vcs: &V,
    ) -> Result<Deployment<Anchored>, DeployError> {
        let anchor = vcs
            .current_revision(&self.ctx.app_dir)
            .await
            .map_err(DeployError::AnchorCapture)?;
        tracing::info!(anchor = %anchor, "captured anchor revision");
        Ok(self.transition(Anchored { anchor }))
    }
}

// =============================================================================
// Anchored -> Synced
// =============================================================================

impl Deployment<Anchored> {
    /// Fetch all remotes, switch to the target branch (creating a tracking
    /// branch if needed) and hard-reset it to the remote tip.
    ///
    /// Local modifications in the checkout are discarded.
    pub async fn sync<V: VersionControl + ?Sized>(self, vcs: &V) -> TransitionResult<Synced, Anchored> {
        match self.align_source(vcs).await {
            Ok(deployed) => {
                let anchor = self.state.anchor.clone();
                tracing::info!(anchor = %anchor, deployed = %deployed, "source aligned");
                Ok(self.transition(Synced {
                    revisions: Revisions { anchor, deployed },
                }))
            }
            Err(e) => Err((self, e)),
        }
    }

    /// Put the checkout back on the anchor after a failed sync.
    pub async fn restore<V: VersionControl + ?Sized>(&self, vcs: &V) -> Result<(), ToolError> {
        vcs.reset_hard(&self.ctx.app_dir, self.state.anchor.as_str())
            .await
    }

    async fn align_source<V: VersionControl + ?Sized>(&self, vcs: &V) -> Result<Revision, DeployError> {
        let dir = &self.ctx.app_dir;
        let branch = &self.ctx.branch;
        let upstream = self.ctx.remote_ref();

        vcs.fetch_all(dir)
            .await
            .map_err(DeployError::sync(SyncStep::Fetch))?;

        let exists = vcs
            .local_branch_exists(dir, branch)
            .await
            .map_err(DeployError::sync(SyncStep::InspectBranch))?;

        let switched = if exists {
            vcs.checkout(dir, branch).await
        } else {
            tracing::info!(branch = %branch, upstream = %upstream, "creating tracking branch");
            vcs.checkout_tracking(dir, branch, &upstream).await
        };
        switched.map_err(DeployError::sync(SyncStep::Checkout))?;

        vcs.reset_hard(dir, &upstream)
            .await
            .map_err(DeployError::sync(SyncStep::Reset))?;

        vcs.current_revision(dir)
            .await
            .map_err(DeployError::sync(SyncStep::ReadBack))
    }
}

// =============================================================================
// Synced -> Provisioned -> Reconciled
// =============================================================================

impl Deployment<Synced> {
    /// Provision the runtime environment. Never fails; see the step log.
    pub async fn provision<I: PackageInstaller + ?Sized>(
        mut self,
        installer: &I,
        diag: &mut Diagnostics,
    ) -> Deployment<Provisioned> {
        let report = provision_dependencies(&self.ctx, installer, diag).await;
        self.steps.provisioning = Some(report);
        let revisions = self.state.revisions.clone();
        self.transition(Provisioned { revisions })
    }
}

impl Deployment<Provisioned> {
    /// Grant the web user read access. Never fails; see the step log.
    pub async fn reconcile_permissions<P: PermissionManager + ?Sized>(
        mut self,
        perms: &P,
        diag: &mut Diagnostics,
    ) -> Deployment<Reconciled> {
        let report = reconcile_permissions(&self.ctx, perms, diag).await;
        self.steps.permissions = Some(report);
        let revisions = self.state.revisions.clone();
        self.transition(Reconciled { revisions })
    }
}

// =============================================================================
// Reconciled -> Activated
// =============================================================================

impl Deployment<Reconciled> {
    /// Reload the service, falling back to a full restart.
    ///
    /// # Errors
    ///
    /// `ActivationFailed` when both fail. The caller should roll back.
    pub async fn activate<S: ServiceSupervisor + ?Sized>(
        mut self,
        supervisor: &S,
    ) -> TransitionResult<Activated, Reconciled> {
        let service = self.ctx.service.clone();

        let activation = match supervisor.reload(&service).await {
            Ok(()) => Activation::Reloaded,
            Err(reload) => {
                tracing::warn!(service = %service, error = %reload, "reload failed, restarting");
                match supervisor.restart(&service).await {
                    Ok(()) => Activation::Restarted,
                    Err(restart) => {
                        return Err((
                            self,
                            DeployError::ActivationFailed {
                                reload: reload.to_string(),
                                restart: restart.to_string(),
                            },
                        ));
                    }
                }
            }
        };

        self.steps.activation = Some(activation);
        let revisions = self.state.revisions.clone();
        Ok(self.transition(Activated { revisions }))
    }
}

// =============================================================================
// Activated -> Verified
// =============================================================================

impl Deployment<Activated> {
    /// Probe the application's own listener until it answers healthily or
    /// the retries run out.
    ///
    /// # Errors
    ///
    /// `LocalHealthFailed` with the last outcome. The caller should roll back.
    pub async fn verify_local<H: HttpProbe + ?Sized>(
        mut self,
        probe: &H,
    ) -> TransitionResult<Verified, Activated> {
        let hc = self.ctx.healthcheck.clone();
        let url = hc.local_url();

        if !hc.start_period.is_zero() {
            tokio::time::sleep(hc.start_period).await;
        }

        let mut retries_remaining = hc.retries;
        loop {
            let outcome = probe.probe(&url, hc.timeout).await;
            if outcome.is_healthy() {
                tracing::info!(url = %url, outcome = %outcome, "local health check passed");
                break;
            }
            if retries_remaining == 0 {
                self.steps.health = HealthState::LocalUnhealthyRolledBack;
                return Err((self, DeployError::LocalHealthFailed(outcome)));
            }
            retries_remaining -= 1;
            tracing::debug!(url = %url, outcome = %outcome, retries_remaining, "local health check not yet passing");
            if hc.interval > Duration::ZERO {
                tokio::time::sleep(hc.interval).await;
            }
        }

        self.steps.health = HealthState::LocalHealthy;
        let revisions = self.state.revisions.clone();
        Ok(self.transition(Verified { revisions }))
    }
}

// =============================================================================
// Verified -> Completed
// =============================================================================

impl Deployment<Verified> {
    /// Single request against the public endpoint. Failure only warns; the
    /// deploy has already been confirmed locally.
    pub async fn verify_public<H: HttpProbe + ?Sized>(
        mut self,
        probe: &H,
        diag: &mut Diagnostics,
    ) -> Self {
        if !self.ctx.public_check {
            tracing::debug!("public health check disabled");
            return self;
        }

        let hc = &self.ctx.healthcheck;
        let url = hc.public_url(&self.ctx.health_host);
        let outcome = probe.probe(&url, hc.timeout).await;

        self.steps.health = if outcome.is_healthy() {
            HealthState::PublicHealthy
        } else {
            diag.warn(Warning::public_health(format!(
                "{url} answered {outcome}; local check passed, keeping the deploy"
            )));
            HealthState::PublicUnhealthyTolerated
        };
        self.steps.public_probe = Some(outcome);
        self
    }

    /// Append the deploy to the history log. A write failure only warns.
    pub fn record(self, log: &HistoryLog, operator: &str, diag: &mut Diagnostics) -> Deployment<Completed> {
        let revisions = self.state.revisions.clone();
        let record = DeployRecord::now(
            self.ctx.branch.clone(),
            revisions.deployed.clone(),
            operator,
        );

        let record = match log.append(&record) {
            Ok(()) => Some(record),
            Err(e) => {
                diag.warn(Warning::history(format!("deploy not recorded: {e}")));
                None
            }
        };

        self.transition(Completed { revisions, record })
    }

    /// The public outcome, if the public check ran.
    pub fn public_probe(&self) -> Option<&ProbeOutcome> {
        self.steps.public_probe.as_ref()
    }
}

// =============================================================================
// Rollback (from any state that has moved the source)
// =============================================================================

impl<S: Rollbackable> Deployment<S> {
    /// Reset the source to the anchor and restart the service.
    ///
    /// # Errors
    ///
    /// `RollbackFailed` if either step fails. The deployment is then in an
    /// unknown state and needs manual attention.
    pub async fn rollback<V, P>(
        self,
        vcs: &V,
        supervisor: &P,
    ) -> Result<Deployment<RolledBack>, DeployError>
    where
        V: VersionControl + ?Sized,
        P: ServiceSupervisor + ?Sized,
    {
        let anchor = self.state.revisions().anchor.clone();
        tracing::warn!(anchor = %anchor, "rolling back");

        if let Err(source) = vcs.reset_hard(&self.ctx.app_dir, anchor.as_str()).await {
            return Err(DeployError::RollbackFailed {
                anchor,
                step: RollbackStep::Reset,
                source,
            });
        }

        if let Err(source) = supervisor.restart(&self.ctx.service).await {
            return Err(DeployError::RollbackFailed {
                anchor,
                step: RollbackStep::Restart,
                source,
            });
        }

        tracing::info!(anchor = %anchor, "rolled back");
        Ok(self.transition(RolledBack { anchor }))
    }
}
