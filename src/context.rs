// ABOUTME: The deployment context threaded through every pipeline step.
// ABOUTME: Replaces ambient working-directory state with explicit paths and names.

use std::path::{Path, PathBuf};

use crate::config::{self, HealthcheckConfig, RequiredTool};
use crate::types::{BranchName, ServiceName};

/// Everything a deploy run needs to know about where and what it deploys.
///
/// Built once from command-line input and passed by reference to each step,
/// so steps never consult the process working directory or environment.
#[derive(Debug, Clone)]
pub struct DeployContext {
    /// Checkout of the application.
    pub app_dir: PathBuf,
    /// Branch to deploy.
    pub branch: BranchName,
    /// Public hostname for the secondary HTTPS probe.
    pub health_host: String,
    /// Remote the branch is aligned to.
    pub remote: String,
    /// systemd unit serving the application.
    pub service: ServiceName,
    /// Identity granted read access for the web server.
    pub web_user: String,
    /// Local and public probe tuning.
    pub healthcheck: HealthcheckConfig,
    /// Whether to run the public HTTPS probe after the local one passes.
    pub public_check: bool,
    /// Executables the preflight insists on.
    pub required_tools: Vec<RequiredTool>,
}

impl DeployContext {
    pub fn new(app_dir: impl Into<PathBuf>, branch: BranchName, service: ServiceName) -> Self {
        Self {
            app_dir: app_dir.into(),
            branch,
            health_host: config::DEFAULT_HEALTH_HOST.to_string(),
            remote: config::DEFAULT_REMOTE.to_string(),
            service,
            web_user: config::DEFAULT_WEB_USER.to_string(),
            healthcheck: HealthcheckConfig::default(),
            public_check: true,
            required_tools: config::REQUIRED_TOOLS.to_vec(),
        }
    }

    pub fn health_host(mut self, host: impl Into<String>) -> Self {
        self.health_host = host.into();
        self
    }

    pub fn remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    pub fn healthcheck(mut self, healthcheck: HealthcheckConfig) -> Self {
        self.healthcheck = healthcheck;
        self
    }

    pub fn public_check(mut self, enabled: bool) -> Self {
        self.public_check = enabled;
        self
    }

    pub fn venv_dir(&self) -> PathBuf {
        self.app_dir.join(config::VENV_DIR)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.app_dir.join(config::MANIFEST_FILE)
    }

    pub fn static_dir(&self) -> PathBuf {
        self.app_dir.join(config::STATIC_DIR)
    }

    pub fn history_path(&self) -> PathBuf {
        self.app_dir.join(config::HISTORY_FILE)
    }

    /// The remote-tracking ref the checkout is force-aligned to.
    pub fn remote_ref(&self) -> String {
        self.branch.remote_ref(&self.remote)
    }

    /// Directories the web server must be able to traverse to reach the app,
    /// outermost first, ending with the app directory itself. The filesystem
    /// root is never included.
    pub fn traverse_chain(&self) -> Vec<PathBuf> {
        let mut chain: Vec<PathBuf> = self
            .app_dir
            .ancestors()
            .filter(|p| !p.as_os_str().is_empty() && p.parent().is_some())
            .map(Path::to_path_buf)
            .collect();
        chain.reverse();
        chain
    }
}
