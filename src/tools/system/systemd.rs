// ABOUTME: ServiceSupervisor implementation backed by systemctl.
// ABOUTME: Runs elevated through sudo unless already root.

use async_trait::async_trait;

use crate::tools::command::{CommandRunner, Privilege, args};
use crate::tools::{ServiceSupervisor, ToolError};
use crate::types::ServiceName;

/// systemd via `systemctl`.
#[derive(Debug, Clone, Default)]
pub struct Systemd {
    runner: CommandRunner,
}

impl Systemd {
    pub fn new(runner: CommandRunner) -> Self {
        Self { runner }
    }

    async fn systemctl(&self, verb: &str, service: &ServiceName) -> Result<(), ToolError> {
        self.runner
            .run(
                "systemctl",
                &args([verb, service.as_str()]),
                None,
                Privilege::Elevated,
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ServiceSupervisor for Systemd {
    async fn reload(&self, service: &ServiceName) -> Result<(), ToolError> {
        self.systemctl("reload", service).await
    }

    async fn restart(&self, service: &ServiceName) -> Result<(), ToolError> {
        self.systemctl("restart", service).await
    }
}
