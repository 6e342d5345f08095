// ABOUTME: VersionControl implementation backed by the git CLI.
// ABOUTME: Every command runs with -C against the application checkout.

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;

use crate::config::GIT;
use crate::tools::command::{CommandRunner, Privilege, args, display_command};
use crate::tools::{ToolError, VersionControl};
use crate::types::{BranchName, Revision};


/// The `git` command-line client.
#[derive(Debug, Clone, Default)]
pub struct Git {
    runner: CommandRunner,
}

impl Git {
    pub fn new(runner: CommandRunner) -> Self {
        Self { runner }
    }

    async fn git(&self, dir: &Path, rest: Vec<OsString>) -> Result<String, ToolError> {
        let mut argv = args(["-C".into(), dir.as_os_str().to_os_string()]);
        argv.extend(rest);
        let output = self.runner.run(GIT.program, &argv, None, Privilege::User).await?;
        Ok(output.stdout)
    }
}

#[async_trait]
impl VersionControl for Git {
    async fn is_repository(&self, dir: &Path) -> bool {
        match self
            .git(dir, args(["rev-parse", "--is-inside-work-tree"]))
            .await
        {
            Ok(stdout) => stdout.trim() == "true",
            Err(e) => {
                tracing::debug!("{} is not a work tree: {}", dir.display(), e);
                false
            }
        }
    }

    async fn current_revision(&self, dir: &Path) -> Result<Revision, ToolError> {
        let argv = args(["rev-parse", "HEAD"]);
        let stdout = self.git(dir, argv.clone()).await?;
        Revision::parse(&stdout).map_err(|e| ToolError::UnexpectedOutput {
            command: display_command(GIT.program, &argv),
            detail: e.to_string(),
        })
    }

    async fn fetch_all(&self, dir: &Path) -> Result<(), ToolError> {
        self.git(dir, args(["fetch", "--all", "--prune"])).await?;
        Ok(())
    }

    async fn local_branch_exists(
        &self,
        dir: &Path,
        branch: &BranchName,
    ) -> Result<bool, ToolError> {
        let mut argv = args(["-C".into(), dir.as_os_str().to_os_string()]);
        argv.extend(args([
            "show-ref".to_string(),
            "--verify".to_string(),
            "--quiet".to_string(),
            format!("refs/heads/{branch}"),
        ]));
        // show-ref exits 1 for a missing ref; anything else is a real failure
        let output = self.runner.output(GIT.program, &argv, None, Privilege::User).await?;
        match output.exit_code {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            _ => Err(ToolError::Failed {
                command: display_command(GIT.program, &argv),
                status: format!("{:?}", output.exit_code),
                stderr: output.stderr.trim().to_string(),
            }),
        }
    }

    async fn checkout(&self, dir: &Path, branch: &BranchName) -> Result<(), ToolError> {
        self.git(dir, args(["checkout", branch.as_str()])).await?;
        Ok(())
    }

    async fn checkout_tracking(
        &self,
        dir: &Path,
        branch: &BranchName,
        upstream: &str,
    ) -> Result<(), ToolError> {
        self.git(
            dir,
            args(["checkout", "-b", branch.as_str(), "--track", upstream]),
        )
        .await?;
        Ok(())
    }

    async fn reset_hard(&self, dir: &Path, target: &str) -> Result<(), ToolError> {
        self.git(dir, args(["reset", "--hard", target])).await?;
        Ok(())
    }
}
