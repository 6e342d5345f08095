// ABOUTME: Collaborator error types with SNAFU pattern.
// ABOUTME: Unifies launch, exit-status and output failures of external tools.

use snafu::Snafu;

/// Failure of an external tool invocation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ToolError {
    #[snafu(display("failed to launch {program}: {source}"))]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[snafu(display("{command} exited with {status}: {stderr}"))]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },

    #[snafu(display("unexpected output from {command}: {detail}"))]
    UnexpectedOutput { command: String, detail: String },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolErrorKind {
    /// The executable could not be started at all.
    NotLaunched,
    /// The tool ran and reported failure.
    NonZeroExit,
    /// The tool succeeded but printed something unusable.
    BadOutput,
}

impl ToolError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> ToolErrorKind {
        match self {
            ToolError::Spawn { .. } => ToolErrorKind::NotLaunched,
            ToolError::Failed { .. } => ToolErrorKind::NonZeroExit,
            ToolError::UnexpectedOutput { .. } => ToolErrorKind::BadOutput,
        }
    }

    /// Shorthand used by test doubles and callers that synthesize failures.
    pub fn failed(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        ToolError::Failed {
            command: command.into(),
            status: "exit status: 1".to_string(),
            stderr: stderr.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_match_variants() {
        let spawn = ToolError::Spawn {
            program: "git".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(spawn.kind(), ToolErrorKind::NotLaunched);
        assert_eq!(
            ToolError::failed("git fetch", "boom").kind(),
            ToolErrorKind::NonZeroExit
        );
    }

    #[test]
    fn failed_display_includes_command_and_stderr() {
        let err = ToolError::failed("systemctl reload app", "Job failed");
        let text = err.to_string();
        assert!(text.contains("systemctl reload app"));
        assert!(text.contains("Job failed"));
    }
}
