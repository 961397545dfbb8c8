//! Test utilities and mocks for alibuild unit tests.
//!
//! [`MockRunner`] stands in for the compiler, binder and linker. It records
//! every command, answers with scripted exit codes and, when created with
//! [`MockRunner::gnat`], writes the files GNAT would have produced.
//!
//! # Example
//!
//! ```rust,ignore
//! use alibuild::test_support::{AdaProject, CommandPattern, MockRunner};
//!
//! #[test]
//! fn test_example() {
//!     let project = AdaProject::greet_program();
//!     let runner = MockRunner::gnat();
//!     runner.fail(CommandPattern::StartsWith("gnatbind".into()), 1);
//!
//!     // Use the runner with a BuildAction...
//! }
//! ```

pub mod fixtures;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::builder::toolchain::CommandSpec;
use crate::util::config::Conventions;
use crate::util::process::CommandRunner;

// Re-export fixtures for convenience
pub use fixtures::*;

/// Pattern for matching commands in MockRunner.
#[derive(Debug, Clone)]
pub enum CommandPattern {
    /// Exact match on full command string.
    Exact(String),
    /// Match if command starts with prefix.
    StartsWith(String),
    /// Match if command contains substring.
    Contains(String),
    /// Match using a regex pattern.
    Regex(String),
    /// Match any command.
    Any,
}

impl CommandPattern {
    /// Check if this pattern matches the given command.
    pub fn matches(&self, cmd: &str) -> bool {
        match self {
            CommandPattern::Exact(s) => cmd == s,
            CommandPattern::StartsWith(s) => cmd.starts_with(s),
            CommandPattern::Contains(s) => cmd.contains(s),
            CommandPattern::Regex(pattern) => regex::Regex::new(pattern)
                .map(|re| re.is_match(cmd))
                .unwrap_or(false),
            CommandPattern::Any => true,
        }
    }
}

/// Scripted response to a matching command.
#[derive(Debug, Clone)]
enum Response {
    Exit(i32),
    SpawnError,
}

#[derive(Debug, Clone)]
struct Expectation {
    pattern: CommandPattern,
    response: Response,
}

/// Mock command runner for testing build actions.
#[derive(Debug, Default)]
pub struct MockRunner {
    expectations: Mutex<Vec<Expectation>>,
    calls: Mutex<Vec<CommandSpec>>,
    simulate: Option<Conventions>,
}

impl MockRunner {
    /// A runner where every command succeeds and produces nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// A runner that produces GNAT's outputs for successful commands.
    pub fn gnat() -> Self {
        MockRunner {
            simulate: Some(Conventions::default()),
            ..Self::default()
        }
    }

    /// Make commands matching `pattern` exit with `code`.
    pub fn fail(&self, pattern: CommandPattern, code: i32) -> &Self {
        self.push(pattern, Response::Exit(code))
    }

    /// Make commands matching `pattern` fail to spawn.
    pub fn spawn_error(&self, pattern: CommandPattern) -> &Self {
        self.push(pattern, Response::SpawnError)
    }

    fn push(&self, pattern: CommandPattern, response: Response) -> &Self {
        if let Ok(mut expectations) = self.expectations.lock() {
            expectations.push(Expectation { pattern, response });
        }
        self
    }

    /// Get all commands that were run.
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn response_for(&self, command: &str) -> Response {
        let expectations = match self.expectations.lock() {
            Ok(e) => e,
            Err(_) => return Response::Exit(0),
        };
        expectations
            .iter()
            .find(|e| e.pattern.matches(command))
            .map(|e| e.response.clone())
            .unwrap_or(Response::Exit(0))
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, cmd: &CommandSpec) -> io::Result<i32> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(cmd.clone());
        }

        match self.response_for(&cmd.display()) {
            Response::SpawnError => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", cmd.program.display()),
            )),
            Response::Exit(0) => {
                if let Some(ref conventions) = self.simulate {
                    simulate_gnat(cmd, conventions)?;
                }
                Ok(0)
            }
            Response::Exit(code) => Ok(code),
        }
    }
}

/// Write what `gcc -c -o X` or `gnatbind X.ali` would have written.
fn simulate_gnat(cmd: &CommandSpec, conventions: &Conventions) -> io::Result<()> {
    if let Some(pos) = cmd.args.iter().position(|a| a == "-o") {
        if cmd.args.iter().any(|a| a == "-c") {
            if let Some(object) = cmd.args.get(pos + 1) {
                let object = Path::new(object);
                write(object, "object\n")?;
                write(&sibling(object, &conventions.ali_suffix), "V \"GNAT Lib\"\n")?;
            }
        } else if let Some(exe) = cmd.args.get(pos + 1) {
            write(Path::new(exe), "executable\n")?;
        }
        return Ok(());
    }

    let program = cmd.program.to_string_lossy();
    if program.contains("bind") {
        let dir = cmd.cwd.clone().unwrap_or_else(|| PathBuf::from("."));
        for ali in cmd.args.iter().filter(|a| a.ends_with(&conventions.ali_suffix)) {
            let stem = crate::core::unit::base_name(Path::new(ali));
            let generated = format!(
                "{}{}{}",
                conventions.bind_prefix, stem, conventions.bind_suffix
            );
            write(
                &dir.join(format!("{}.ads", generated)),
                "package ada_main is\nend ada_main;\n",
            )?;
            write(
                &dir.join(format!("{}.adb", generated)),
                "package body ada_main is\nend ada_main;\n",
            )?;
        }
    }

    Ok(())
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let stem = crate::core::unit::base_name(path);
    path.with_file_name(format!("{}{}", stem, suffix))
}

fn write(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_pattern_matching() {
        assert!(CommandPattern::Exact("gnatbind a.ali".into()).matches("gnatbind a.ali"));
        assert!(CommandPattern::StartsWith("gcc".into()).matches("gcc -c a.adb"));
        assert!(CommandPattern::Contains("b~".into()).matches("gcc -c b~main.adb"));
        assert!(CommandPattern::Regex(r"^gnat\w+".into()).matches("gnatlink x"));
        assert!(!CommandPattern::Regex("[".into()).matches("anything"));
        assert!(CommandPattern::Any.matches(""));
    }

    #[test]
    fn test_mock_runner_records_and_scripts() {
        let runner = MockRunner::new();
        runner.fail(CommandPattern::StartsWith("gnatbind".into()), 3);

        assert_eq!(runner.run(&CommandSpec::new("gcc").args(["-v"])).unwrap(), 0);
        assert_eq!(runner.run(&CommandSpec::new("gnatbind")).unwrap(), 3);
        assert_eq!(runner.calls().len(), 2);
    }

    #[test]
    fn test_gnat_simulation() {
        let tmp = tempfile::TempDir::new().unwrap();
        let runner = MockRunner::gnat();
        let object = tmp.path().join("main.o");

        runner
            .run(
                &CommandSpec::new("gcc")
                    .args(["-c", "-o"])
                    .args([object.to_string_lossy().into_owned()])
                    .args(["main.adb"]),
            )
            .unwrap();
        assert!(object.exists());
        assert!(tmp.path().join("main.ali").exists());

        runner
            .run(
                &CommandSpec::new("gnatbind")
                    .args([tmp.path().join("main.ali").to_string_lossy().into_owned()])
                    .cwd(tmp.path()),
            )
            .unwrap();
        assert!(tmp.path().join("b~main.adb").exists());
        assert!(tmp.path().join("b~main.ads").exists());
    }
}
