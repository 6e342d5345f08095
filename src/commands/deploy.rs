// ABOUTME: Deploy command implementation.
// ABOUTME: Runs the pipeline against host tools and reports warnings and the result.

use gitship::context::DeployContext;
use gitship::deploy::pipeline;
use gitship::diagnostics::Diagnostics;
use gitship::error::Result;
use gitship::output::Output;
use gitship::tools::Collaborators;

/// Deploy `ctx.branch` using the tools installed on this host.
pub async fn deploy(ctx: DeployContext, mut output: Output) -> Result<()> {
    output.start_timer();
    let tools = Collaborators::system();
    let mut diag = Diagnostics::default();

    let result = pipeline::run(ctx, &tools, &output, &mut diag).await;

    // Emit collected warnings
    for warning in diag.warnings() {
        output.warning(&warning.message);
    }

    let report = result?;
    output.json(&report);
    let mut summary = format!(
        "Deployed {} at {}",
        report.branch,
        report.revisions.deployed.short()
    );
    match output.warnings_shown() {
        0 => {}
        1 => summary.push_str(" with 1 warning"),
        n => summary.push_str(&format!(" with {n} warnings")),
    }
    output.success(&summary);
    Ok(())
}
