// ABOUTME: Production collaborators that shell out to host tools.
// ABOUTME: git, python venv/pip, systemctl, setfacl, PATH lookup and HTTP probing.

mod acl;
mod git;
mod http;
mod path;
mod systemd;
mod venv;

pub use acl::Setfacl;
pub use git::Git;
pub use http::HttpClient;
pub use path::PathLocator;
pub use systemd::Systemd;
pub use venv::Venv;
