// ABOUTME: PermissionManager implementation backed by setfacl.
// ABOUTME: Translates an AclGrant into -R/-d/-m flags.

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;

use crate::tools::command::{CommandRunner, Privilege};
use crate::tools::{AclGrant, PermissionManager, ToolError};

/// POSIX ACLs via `setfacl`.
#[derive(Debug, Clone, Default)]
pub struct Setfacl {
    runner: CommandRunner,
}

impl Setfacl {
    pub fn new(runner: CommandRunner) -> Self {
        Self { runner }
    }
}

fn setfacl_args(path: &Path, grant: &AclGrant) -> Vec<OsString> {
    let mut argv = Vec::new();
    if grant.recursive {
        argv.push(OsString::from("-R"));
    }
    if grant.default {
        argv.push(OsString::from("-d"));
    }
    argv.push(OsString::from("-m"));
    argv.push(OsString::from(grant.entry()));
    argv.push(path.as_os_str().to_os_string());
    argv
}

#[async_trait]
impl PermissionManager for Setfacl {
    async fn grant(&self, path: &Path, grant: &AclGrant) -> Result<(), ToolError> {
        self.runner
            .run(
                "setfacl",
                &setfacl_args(path, grant),
                None,
                Privilege::Elevated,
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::command::args;

    #[test]
    fn traverse_grant_is_a_single_modify() {
        let argv = setfacl_args(Path::new("/srv/app"), &AclGrant::traverse("www-data"));
        assert_eq!(argv, args(["-m", "u:www-data:rx", "/srv/app"]));
    }

    #[test]
    fn default_tree_grant_sets_recursive_and_default_flags() {
        let argv = setfacl_args(
            Path::new("/srv/app/static"),
            &AclGrant::default_read_tree("www-data"),
        );
        assert_eq!(
            argv,
            args(["-R", "-d", "-m", "u:www-data:rX", "/srv/app/static"])
        );
    }
}
