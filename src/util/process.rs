//! Subprocess execution utilities.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use crate::builder::toolchain::CommandSpec;

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Create a process builder from a toolchain command.
    pub fn from_spec(spec: &CommandSpec) -> Self {
        let pb = ProcessBuilder::new(&spec.program).args(&spec.args);
        match spec.cwd {
            Some(ref cwd) => pb.cwd(cwd),
            None => pb,
        }
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        cmd
    }

    /// Execute with inherited stdio and return the status.
    pub fn status(&self) -> io::Result<ExitStatus> {
        self.build_command().status()
    }
}

/// Runs toolchain commands and reports their exit code.
///
/// A process killed by a signal reports `-1`.
pub trait CommandRunner {
    fn run(&self, cmd: &CommandSpec) -> io::Result<i32>;
}

/// Runs commands as child processes, blocking until they exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, cmd: &CommandSpec) -> io::Result<i32> {
        tracing::info!("{}", cmd.display());
        let status = ProcessBuilder::from_spec(cmd).status()?;
        Ok(status.code().unwrap_or(-1))
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}
