// ABOUTME: Package installer trait for the isolated runtime environment.
// ABOUTME: Environment creation, installer self-upgrade and manifest installs.

use async_trait::async_trait;
use std::path::Path;

use crate::tools::ToolError;

/// Manages an isolated interpreter environment and its packages.
#[async_trait]
pub trait PackageInstaller: Send + Sync {
    /// Whether a usable environment already exists at `env`.
    async fn environment_exists(&self, env: &Path) -> bool;

    /// Create a fresh environment at `env`.
    async fn create_environment(&self, env: &Path) -> Result<(), ToolError>;

    /// Upgrade the installer inside the environment.
    async fn upgrade_installer(&self, env: &Path) -> Result<(), ToolError>;

    /// Install or upgrade every package listed in `manifest`.
    async fn install_manifest(&self, env: &Path, manifest: &Path) -> Result<(), ToolError>;
}
