// ABOUTME: Filesystem ACL trait and the grant description it applies.
// ABOUTME: Grants are idempotent; applying one twice changes nothing.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::tools::ToolError;

/// One ACL entry for a named user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AclGrant {
    /// User the entry names.
    pub identity: String,
    /// Permission letters in setfacl syntax, e.g. `rx` or `rX`.
    pub perms: String,
    /// Apply to the whole subtree.
    pub recursive: bool,
    /// Set the default ACL inherited by files created later.
    pub default: bool,
}

impl AclGrant {
    /// Read and traverse on a single directory.
    pub fn traverse(identity: &str) -> Self {
        Self {
            identity: identity.to_string(),
            perms: "rx".to_string(),
            recursive: false,
            default: false,
        }
    }

    /// Read on files and traverse on directories, for a whole subtree.
    pub fn read_tree(identity: &str) -> Self {
        Self {
            identity: identity.to_string(),
            perms: "rX".to_string(),
            recursive: true,
            default: false,
        }
    }

    /// Like `read_tree`, but inherited by future files.
    pub fn default_read_tree(identity: &str) -> Self {
        Self {
            default: true,
            ..Self::read_tree(identity)
        }
    }

    /// The `-m` argument for setfacl.
    pub fn entry(&self) -> String {
        format!("u:{}:{}", self.identity, self.perms)
    }
}

impl fmt::Display for AclGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.entry())?;
        if self.recursive {
            write!(f, " (recursive)")?;
        }
        if self.default {
            write!(f, " (default)")?;
        }
        Ok(())
    }
}

/// Applies ACL entries to paths.
#[async_trait]
pub trait PermissionManager: Send + Sync {
    async fn grant(&self, path: &Path, grant: &AclGrant) -> Result<(), ToolError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_uses_user_syntax() {
        assert_eq!(AclGrant::traverse("www-data").entry(), "u:www-data:rx");
        assert_eq!(AclGrant::read_tree("www-data").entry(), "u:www-data:rX");
    }

    #[test]
    fn default_grant_is_recursive() {
        let grant = AclGrant::default_read_tree("www-data");
        assert!(grant.recursive);
        assert!(grant.default);
        assert_eq!(grant.to_string(), "u:www-data:rX (recursive) (default)");
    }
}
