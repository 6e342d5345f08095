// ABOUTME: External collaborators: capability traits, host implementations, errors.
// ABOUTME: The pipeline only sees the traits, bundled in Collaborators.

pub mod command;
mod error;
pub mod system;
mod traits;

pub use error::{ToolError, ToolErrorKind};
pub use traits::{
    AclGrant, HttpProbe, PackageInstaller, PermissionManager, ProbeOutcome, ServiceSupervisor,
    ToolLocator, VersionControl,
};

use command::CommandRunner;

/// One implementation of every collaborator a deploy drives.
pub struct Collaborators {
    pub locator: Box<dyn ToolLocator>,
    pub vcs: Box<dyn VersionControl>,
    pub installer: Box<dyn PackageInstaller>,
    pub supervisor: Box<dyn ServiceSupervisor>,
    pub permissions: Box<dyn PermissionManager>,
    pub probe: Box<dyn HttpProbe>,
}

impl Collaborators {
    /// Collaborators backed by the tools installed on this host.
    pub fn system() -> Self {
        let runner = CommandRunner::default();
        Self {
            locator: Box::new(system::PathLocator::default()),
            vcs: Box::new(system::Git::new(runner.clone())),
            installer: Box::new(system::Venv::new(runner.clone())),
            supervisor: Box::new(system::Systemd::new(runner.clone())),
            permissions: Box::new(system::Setfacl::new(runner.clone())),
            probe: Box::new(system::HttpClient::new(runner)),
        }
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}
