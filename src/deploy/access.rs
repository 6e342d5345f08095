// ABOUTME: Web server read-access reconciliation over the application tree.
// ABOUTME: Traverse on the directory chain, recursive read plus default ACL on static assets.

use std::path::PathBuf;

use crate::context::DeployContext;
use crate::diagnostics::{Diagnostics, Warning};
use crate::tools::{AclGrant, PermissionManager};

use super::outcome::{PermissionReport, PermissionResult, StepOutcome};

/// Grants needed for the web user to read the app, in application order.
pub fn planned_grants(ctx: &DeployContext) -> Vec<(PathBuf, AclGrant)> {
    let user = ctx.web_user.as_str();
    let mut grants: Vec<(PathBuf, AclGrant)> = ctx
        .traverse_chain()
        .into_iter()
        .map(|dir| (dir, AclGrant::traverse(user)))
        .collect();

    let static_dir = ctx.static_dir();
    grants.push((static_dir.clone(), AclGrant::read_tree(user)));
    grants.push((static_dir, AclGrant::default_read_tree(user)));
    grants
}

/// Apply every planned grant. Missing paths are skipped; failures are warnings.
pub async fn reconcile_permissions<P: PermissionManager + ?Sized>(
    ctx: &DeployContext,
    perms: &P,
    diag: &mut Diagnostics,
) -> PermissionReport {
    let mut report = PermissionReport::default();

    for (path, grant) in planned_grants(ctx) {
        let outcome = if !path.exists() {
            tracing::debug!(path = %path.display(), "skipping grant on missing path");
            StepOutcome::Skipped("path does not exist".to_string())
        } else {
            match perms.grant(&path, &grant).await {
                Ok(()) => StepOutcome::Applied,
                Err(e) => {
                    diag.warn(Warning::permission(format!(
                        "could not grant {grant} on {}: {e}",
                        path.display()
                    )));
                    StepOutcome::FailedNonFatal(e.to_string())
                }
            }
        };
        report.results.push(PermissionResult {
            path,
            grant,
            outcome,
        });
    }

    report
}
