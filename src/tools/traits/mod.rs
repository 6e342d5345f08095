// ABOUTME: Capability traits for the external tools a deploy drives.
// ABOUTME: Defines ToolLocator, VersionControl, PackageInstaller, ServiceSupervisor, PermissionManager, HttpProbe.

mod installer;
mod locator;
mod permissions;
mod probe;
mod supervisor;
mod vcs;

pub use installer::PackageInstaller;
pub use locator::ToolLocator;
pub use permissions::{AclGrant, PermissionManager};
pub use probe::{HttpProbe, ProbeOutcome};
pub use supervisor::ServiceSupervisor;
pub use vcs::VersionControl;
