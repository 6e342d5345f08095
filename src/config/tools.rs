// ABOUTME: External executables the deploy cannot run without.
// ABOUTME: Each tool carries the role it plays so preflight errors can name it.

/// An executable that must be on `PATH` before anything is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredTool {
    pub program: &'static str,
    pub role: &'static str,
}

pub const GIT: RequiredTool = RequiredTool {
    program: "git",
    role: "version-control client",
};

pub const PYTHON: RequiredTool = RequiredTool {
    program: "python3",
    role: "runtime interpreter",
};

pub const PIP: RequiredTool = RequiredTool {
    program: "pip3",
    role: "package installer",
};

/// Checked in order; the first missing tool fails the preflight.
pub const REQUIRED_TOOLS: [RequiredTool; 3] = [GIT, PYTHON, PIP];
