// ABOUTME: The full deploy run, driving a Deployment through every state.
// ABOUTME: Narrates each step and rolls back on activation or local health failure.

use crate::context::DeployContext;
use crate::diagnostics::{Diagnostics, Warning};
use crate::history::{HistoryLog, operator_identity};
use crate::output::Output;
use crate::tools::Collaborators;

use super::Deployment;
use super::error::DeployError;
use super::outcome::{Activation, DeployReport, HealthState, StepOutcome};
use super::state::Rollbackable;

/// Deploy `ctx.branch` into `ctx.app_dir` using `tools`.
///
/// Non-fatal problems go to `diag` only; the caller decides how to show them.
/// Returns the run report on success. Activation and local health failures
/// are rolled back before the error is returned; if the rollback itself
/// fails the error is `RollbackFailed`.
pub async fn run(
    ctx: DeployContext,
    tools: &Collaborators,
    output: &Output,
    diag: &mut Diagnostics,
) -> Result<DeployReport, DeployError> {
    let history = HistoryLog::new(ctx.history_path());
    let operator = operator_identity();

    output.header(&format!(
        "Deploying {} to {}",
        ctx.branch,
        ctx.app_dir.display()
    ));

    output.progress("Running preflight checks");
    let deployment = Deployment::new(ctx)
        .preflight(&*tools.locator, &*tools.vcs)
        .await?;
    output.step("Preflight passed");

    let deployment = deployment.capture_anchor(&*tools.vcs).await?;
    output.progress(&format!(
        "Current revision {}; syncing with {}",
        deployment.anchor().short(),
        deployment.context().remote_ref()
    ));

    let deployment = match deployment.sync(&*tools.vcs).await {
        Ok(d) => d,
        Err((d, e)) => {
            if let DeployError::SyncFailed { step, .. } = &e
                && step.touched_checkout()
            {
                output.progress(&format!("Restoring checkout to {}", d.anchor().short()));
                if let Err(restore) = d.restore(&*tools.vcs).await {
                    diag.warn(Warning::checkout_restore(format!(
                        "could not restore checkout to {}: {restore}",
                        d.anchor()
                    )));
                }
            }
            return Err(e);
        }
    };
    output.step(&format!(
        "Source moved {} → {}",
        deployment.anchor().short(),
        deployment.deployed().short()
    ));

    output.progress("Provisioning dependencies");
    let deployment = deployment.provision(&*tools.installer, diag).await;
    if let Some(report) = &deployment.steps().provisioning {
        if let StepOutcome::Skipped(reason) = &report.dependencies {
            output.progress(&format!("Dependency install skipped: {reason}"));
        }
        if !report.has_failures() {
            output.step("Dependencies provisioned");
        }
    }

    output.progress("Reconciling web server permissions");
    let deployment = deployment
        .reconcile_permissions(&*tools.permissions, diag)
        .await;
    if let Some(report) = &deployment.steps().permissions {
        let summary = format!(
            "{} applied, {} skipped, {} failed",
            report.applied(),
            report.skipped(),
            report.failed()
        );
        if report.failed() == 0 {
            output.step(&format!("Permissions reconciled ({summary})"));
        } else {
            output.progress(&format!("Permissions partially reconciled ({summary})"));
        }
    }

    output.progress(&format!("Reloading {}", deployment.service()));
    let deployment = match deployment.activate(&*tools.supervisor).await {
        Ok(d) => d,
        Err((d, e)) => return Err(roll_back(d, e, tools, output).await),
    };
    match deployment.steps().activation {
        Some(Activation::Restarted) => {
            output.step(&format!("Restarted {} (reload failed)", deployment.service()))
        }
        _ => output.step(&format!("Reloaded {}", deployment.service())),
    }

    let local_url = deployment.context().healthcheck.local_url();
    output.progress(&format!("Checking local health at {local_url}"));
    let deployment = match deployment.verify_local(&*tools.probe).await {
        Ok(d) => d,
        Err((d, e)) => return Err(roll_back(d, e, tools, output).await),
    };
    output.step("Local health check passed");

    let deployment = deployment.verify_public(&*tools.probe, diag).await;
    match (deployment.steps().health, deployment.public_probe()) {
        (HealthState::PublicHealthy, Some(outcome)) => {
            output.step(&format!("Public endpoint healthy ({outcome})"))
        }
        (HealthState::PublicUnhealthyTolerated, _) => {}
        _ => output.progress("Public endpoint check skipped"),
    }

    let deployment = deployment.record(&history, &operator, diag);
    if deployment.record().is_some() {
        output.step(&format!("Recorded in {}", history.path().display()));
    }

    Ok(deployment.into_report())
}

/// Roll back after `trigger`, returning the error the run should end with.
async fn roll_back<S: Rollbackable>(
    deployment: Deployment<S>,
    trigger: DeployError,
    tools: &Collaborators,
    output: &Output,
) -> DeployError {
    output.warning(&format!(
        "{trigger}; rolling back to {}",
        deployment.anchor().short()
    ));

    match deployment
        .rollback(&*tools.vcs, &*tools.supervisor)
        .await
    {
        Ok(restored) => {
            output.step(&format!(
                "Rolled back to {} and restarted {}",
                restored.restored().short(),
                restored.service()
            ));
            trigger
        }
        Err(e) => e,
    }
}
