// ABOUTME: Dependency provisioning into the isolated runtime environment.
// ABOUTME: Every sub-step is tolerated; failures become warnings, never errors.

use crate::context::DeployContext;
use crate::diagnostics::{Diagnostics, Warning};
use crate::tools::PackageInstaller;

use super::outcome::{ProvisionReport, StepOutcome};

/// Ensure the environment exists, upgrade its installer and install the manifest.
///
/// A missing manifest skips the install. A failed environment creation skips
/// the two steps that would run inside it.
pub async fn provision_dependencies<I: PackageInstaller + ?Sized>(
    ctx: &DeployContext,
    installer: &I,
    diag: &mut Diagnostics,
) -> ProvisionReport {
    let env = ctx.venv_dir();

    let environment = if installer.environment_exists(&env).await {
        tracing::debug!(env = %env.display(), "reusing environment");
        StepOutcome::Skipped("reusing existing environment".to_string())
    } else {
        match installer.create_environment(&env).await {
            Ok(()) => StepOutcome::Applied,
            Err(e) => {
                diag.warn(Warning::provisioning(format!(
                    "could not create environment at {}: {e}",
                    env.display()
                )));
                StepOutcome::FailedNonFatal(e.to_string())
            }
        }
    };

    if environment.is_failure() {
        let skipped = StepOutcome::Skipped("no environment".to_string());
        return ProvisionReport {
            environment,
            installer: skipped.clone(),
            dependencies: skipped,
        };
    }

    let upgrade = match installer.upgrade_installer(&env).await {
        Ok(()) => StepOutcome::Applied,
        Err(e) => {
            diag.warn(Warning::provisioning(format!(
                "could not upgrade installer: {e}"
            )));
            StepOutcome::FailedNonFatal(e.to_string())
        }
    };

    let manifest = ctx.manifest_path();
    let dependencies = if !manifest.is_file() {
        tracing::info!(manifest = %manifest.display(), "no dependency manifest");
        StepOutcome::Skipped(format!("no {}", crate::config::MANIFEST_FILE))
    } else {
        match installer.install_manifest(&env, &manifest).await {
            Ok(()) => StepOutcome::Applied,
            Err(e) => {
                diag.warn(Warning::provisioning(format!(
                    "dependency install failed: {e}"
                )));
                StepOutcome::FailedNonFatal(e.to_string())
            }
        }
    };

    ProvisionReport {
        environment,
        installer: upgrade,
        dependencies,
    }
}
