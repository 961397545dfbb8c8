//! Toolchain health checks for `alibuild doctor`.
//!
//! Required: the compiler (`[tools] ada`) and binder (`[tools] adabind`) are
//! on PATH and the build directory is usable. Optional: the linker and the
//! configured search directories.

use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::util::config::Config;
use crate::util::process::find_executable;
use crate::util::GlobalContext;

/// Outcome of one check.
#[derive(Debug, Clone)]
pub struct Check {
    pub name: &'static str,
    /// A failed optional check does not fail the report
    pub required: bool,
    /// What was found, or what is wrong
    pub outcome: Result<String, String>,
}

impl Check {
    fn required(name: &'static str, outcome: Result<String, String>) -> Self {
        Check {
            name,
            required: true,
            outcome,
        }
    }

    fn optional(name: &'static str, outcome: Result<String, String>) -> Self {
        Check {
            name,
            required: false,
            outcome,
        }
    }

    pub fn passed(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// All checks, in the order they ran.
#[derive(Debug, Clone, Default)]
pub struct DoctorReport {
    pub checks: Vec<Check>,
}

impl DoctorReport {
    /// Whether every required check passed.
    pub fn all_required_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed() || !c.required)
    }

    /// One status line per check, with details when `verbose`.
    pub fn render(&self, verbose: bool) -> String {
        let mut out = String::new();

        for check in &self.checks {
            let status = if check.passed() { "ok" } else { "!!" };
            let optional = if check.required { "" } else { " (optional)" };
            let _ = writeln!(out, "[{}] {}{}", status, check.name, optional);

            match &check.outcome {
                Err(problem) => {
                    let _ = writeln!(out, "     {}", problem);
                }
                Ok(found) if verbose => {
                    let _ = writeln!(out, "     {}", found);
                }
                Ok(_) => {}
            }
        }

        let failed = self.checks.iter().filter(|c| !c.passed()).count();
        if !self.all_required_passed() {
            let _ = writeln!(out, "\nrequired checks failed; builds will not work");
        } else if failed > 0 {
            let _ = writeln!(out, "\n{} optional check(s) failed", failed);
        } else {
            let _ = writeln!(out, "\nall checks passed");
        }

        out
    }
}

/// Check the toolchain and directories configured for `ctx`.
pub fn doctor(ctx: &GlobalContext) -> DoctorReport {
    check_config(&ctx.load_config(), ctx.build_dir())
}

/// Run every check against an already loaded configuration.
pub fn check_config(config: &Config, build_dir: &Path) -> DoctorReport {
    DoctorReport {
        checks: vec![
            Check::required("Compiler", check_tool(config.ada())),
            Check::required("Binder", check_tool(config.adabind())),
            Check::optional("Linker", check_tool(config.adalink())),
            Check::optional("Include path", check_dirs(&config.paths.include)),
            Check::optional("Objects path", check_dirs(&config.paths.objects)),
            Check::required("Build directory", check_build_dir(build_dir)),
        ],
    }
}

/// Locate `program` on PATH and report its first `--version` line.
fn check_tool(program: &str) -> Result<String, String> {
    let path = find_executable(program).ok_or_else(|| format!("`{}` not found in PATH", program))?;

    let version = Command::new(&path)
        .arg("--version")
        .output()
        .ok()
        .and_then(|output| {
            let text = if output.stdout.is_empty() {
                output.stderr
            } else {
                output.stdout
            };
            String::from_utf8_lossy(&text)
                .lines()
                .map(str::trim)
                .find(|l| !l.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "unknown version".to_string());

    Ok(format!("{} ({})", path.display(), version))
}

fn check_dirs(dirs: &[PathBuf]) -> Result<String, String> {
    if dirs.is_empty() {
        return Ok("none configured".to_string());
    }

    let missing: Vec<String> = dirs
        .iter()
        .filter(|d| !d.is_dir())
        .map(|d| d.display().to_string())
        .collect();
    if !missing.is_empty() {
        return Err(format!("missing: {}", missing.join(", ")));
    }

    Ok(dirs
        .iter()
        .map(|d| d.display().to_string())
        .collect::<Vec<_>>()
        .join(", "))
}

fn check_build_dir(build_dir: &Path) -> Result<String, String> {
    if build_dir.is_dir() {
        Ok(format!("{} exists", build_dir.display()))
    } else if build_dir.exists() {
        Err(format!("{} is not a directory", build_dir.display()))
    } else {
        Ok(format!("{} will be created", build_dir.display()))
    }
}
