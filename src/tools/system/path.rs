// ABOUTME: ToolLocator implementation that searches PATH.
// ABOUTME: Mirrors what a shell does when resolving a bare command name.

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::tools::ToolLocator;

/// Looks executables up in the directories of a PATH-style list.
#[derive(Debug, Clone)]
pub struct PathLocator {
    search_path: Option<OsString>,
}

impl Default for PathLocator {
    fn default() -> Self {
        Self {
            search_path: std::env::var_os("PATH"),
        }
    }
}

impl PathLocator {
    /// Search an explicit PATH value instead of the process environment.
    pub fn with_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
        }
    }
}

#[async_trait]
impl ToolLocator for PathLocator {
    async fn locate(&self, program: &str) -> Option<PathBuf> {
        let search_path = self.search_path.as_ref()?;
        std::env::split_paths(search_path)
            .map(|dir| dir.join(program))
            .find(|candidate| is_executable(candidate))
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
