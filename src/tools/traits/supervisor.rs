// ABOUTME: Service supervisor trait for the application process.
// ABOUTME: Reload keeps the process; restart replaces it.

use async_trait::async_trait;

use crate::tools::ToolError;
use crate::types::ServiceName;

/// Controls the long-running application service.
#[async_trait]
pub trait ServiceSupervisor: Send + Sync {
    /// Re-read code and configuration without dropping the process.
    async fn reload(&self, service: &ServiceName) -> Result<(), ToolError>;

    /// Stop the running process and start a new one.
    async fn restart(&self, service: &ServiceName) -> Result<(), ToolError>;
}
