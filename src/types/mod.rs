// ABOUTME: Validated domain types shared across the deploy pipeline.
// ABOUTME: Revisions, branch names and service names are checked at construction.

mod branch_name;
mod revision;
mod service_name;

pub use branch_name::{BranchName, BranchNameError};
pub use revision::{Revision, RevisionError};
pub use service_name::{ServiceName, ServiceNameError};
