// ABOUTME: Local process execution shared by the system collaborators.
// ABOUTME: Runs a program to completion, optionally through passwordless sudo.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use snafu::ResultExt;
use tokio::process::Command;

use super::error::{FailedSnafu, SpawnSnafu, ToolError};

/// Output from a local command execution.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code of the command (None when killed by a signal).
    pub exit_code: Option<i32>,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Whether a command needs elevated privilege.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Privilege {
    User,
    Elevated,
}

/// Builds and runs external commands.
///
/// No timeout is applied: a hung tool hangs the caller.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    use_sudo: bool,
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self {
            use_sudo: !running_as_root(),
        }
    }
}

impl CommandRunner {
    /// Runner that never prefixes `sudo`.
    pub fn without_sudo() -> Self {
        Self { use_sudo: false }
    }

    /// Run a command and capture its output, whatever the exit status.
    pub async fn output(
        &self,
        program: &str,
        args: &[OsString],
        cwd: Option<&Path>,
        privilege: Privilege,
    ) -> Result<CommandOutput, ToolError> {
        let (exe, argv) = self.argv(program, args, privilege);
        tracing::debug!(program = %exe, args = ?argv, "running command");

        let mut cmd = Command::new(&exe);
        cmd.args(&argv)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        let output = cmd.output().await.context(SpawnSnafu { program: exe })?;

        let result = CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };
        tracing::debug!(program, exit_code = ?result.exit_code, "command finished");
        Ok(result)
    }

    /// Run a command and fail unless it exits successfully.
    pub async fn run(
        &self,
        program: &str,
        args: &[OsString],
        cwd: Option<&Path>,
        privilege: Privilege,
    ) -> Result<CommandOutput, ToolError> {
        let output = self.output(program, args, cwd, privilege).await?;
        if output.success() {
            return Ok(output);
        }

        FailedSnafu {
            command: display_command(program, args),
            status: match output.exit_code {
                Some(code) => format!("exit status: {code}"),
                None => "signal".to_string(),
            },
            stderr: output.stderr.trim().to_string(),
        }
        .fail()
    }

    fn argv(&self, program: &str, args: &[OsString], privilege: Privilege) -> (String, Vec<OsString>) {
        if privilege == Privilege::Elevated && self.use_sudo {
            let mut argv = Vec::with_capacity(args.len() + 2);
            argv.push(OsString::from("-n"));
            argv.push(OsString::from(program));
            argv.extend(args.iter().cloned());
            ("sudo".to_string(), argv)
        } else {
            (program.to_string(), args.to_vec())
        }
    }
}

/// Collect heterogeneous arguments into the form `CommandRunner` takes.
pub fn args<I, S>(items: I) -> Vec<OsString>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    items.into_iter().map(Into::into).collect()
}

/// `program arg arg` for error messages.
pub fn display_command(program: &str, args: &[OsString]) -> String {
    let mut text = program.to_string();
    for arg in args {
        text.push(' ');
        text.push_str(&arg.to_string_lossy());
    }
    text
}

/// Resolve the executable inside a virtual environment's `bin` directory.
pub fn venv_bin(venv: &Path, program: &str) -> PathBuf {
    venv.join("bin").join(program)
}

fn running_as_root() -> bool {
    effective_uid().is_some_and(|uid| uid == "0")
}

fn effective_uid() -> Option<String> {
    // Uid: real effective saved fs
    std::fs::read_to_string("/proc/self/status")
        .ok()
        .and_then(|s| {
            s.lines()
                .find(|l| l.starts_with("Uid:"))
                .and_then(|l| l.split_whitespace().nth(2))
                .map(|s| s.to_string())
        })
}
