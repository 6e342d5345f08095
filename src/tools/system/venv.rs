// ABOUTME: PackageInstaller implementation using python venv and pip.
// ABOUTME: The environment is created once and reused on later deploys.

use async_trait::async_trait;
use std::path::Path;

use crate::config::PYTHON;
use crate::tools::command::{CommandRunner, Privilege, args, venv_bin};
use crate::tools::{PackageInstaller, ToolError};

/// Python virtual environments managed with `python3 -m venv` and `pip`.
#[derive(Debug, Clone, Default)]
pub struct Venv {
    runner: CommandRunner,
}

impl Venv {
    pub fn new(runner: CommandRunner) -> Self {
        Self { runner }
    }

    async fn pip(&self, env: &Path, rest: &[&str], extra: Option<&Path>) -> Result<(), ToolError> {
        let pip = venv_bin(env, "pip");
        let mut argv = args(rest.iter().copied());
        if let Some(path) = extra {
            argv.push(path.as_os_str().to_os_string());
        }
        self.runner
            .run(&pip.to_string_lossy(), &argv, None, Privilege::User)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl PackageInstaller for Venv {
    async fn environment_exists(&self, env: &Path) -> bool {
        venv_bin(env, "python").exists()
    }

    async fn create_environment(&self, env: &Path) -> Result<(), ToolError> {
        let mut argv = args(["-m", "venv"]);
        argv.push(env.as_os_str().to_os_string());
        self.runner
            .run(PYTHON.program, &argv, None, Privilege::User)
            .await?;
        Ok(())
    }

    async fn upgrade_installer(&self, env: &Path) -> Result<(), ToolError> {
        self.pip(env, &["install", "--upgrade", "pip"], None).await
    }

    async fn install_manifest(&self, env: &Path, manifest: &Path) -> Result<(), ToolError> {
        self.pip(env, &["install", "--upgrade", "-r"], Some(manifest))
            .await
    }
}
