//! The build action: compile, and for entry points bind and recompile.
//!
//! For a library unit the action is a single compiler run. For an entry
//! point it continues:
//!
//! 1. compile the unit (object + ALI)
//! 2. run the binder on the unit's ALI, producing `b~unit.adb`/`.ads`
//! 3. compile the generated body next to the unit's object
//! 4. delete the generated pair, as `gnatlink` would
//!
//! Each step short-circuits on failure. If anything fails before step 4 the
//! generated files stay on disk for inspection.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::builder::naming::{ArtifactNamer, BindUnits};
use crate::builder::toolchain::{CommandSpec, TemplateError, Toolchain};
use crate::core::unit::filter_sources;
use crate::scan::is_entry_point;
use crate::util::process::CommandRunner;

/// External tool invoked by the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Compiler,
    Binder,
    Linker,
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Tool::Compiler => "compiler",
            Tool::Binder => "binder",
            Tool::Linker => "linker",
        };
        f.write_str(name)
    }
}

/// Failure of a build action.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("no Ada sources to build")]
    NoSources,

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("failed to run `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("{tool} exited with status {code}: `{command}`")]
    ToolFailed {
        tool: Tool,
        command: String,
        code: i32,
    },

    #[error("failed to remove generated file {}", path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ActionError {
    /// Non-zero status to report to the caller.
    pub fn exit_code(&self) -> i32 {
        match self {
            ActionError::ToolFailed { code, .. } if *code > 0 => *code,
            _ => 1,
        }
    }
}

/// What a successful action produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildOutcome {
    /// Object files compiled, the unit's own first
    pub objects: Vec<PathBuf>,
    /// Binder pair generated (and since removed) for an entry point
    pub bound: Option<BindUnits>,
}

/// Runs the compile/bind/recompile sequence for one unit.
pub struct BuildAction<'a, R: CommandRunner + ?Sized> {
    namer: &'a ArtifactNamer,
    toolchain: &'a Toolchain,
    runner: &'a R,
}

impl<'a, R: CommandRunner + ?Sized> BuildAction<'a, R> {
    pub fn new(namer: &'a ArtifactNamer, toolchain: &'a Toolchain, runner: &'a R) -> Self {
        BuildAction {
            namer,
            toolchain,
            runner,
        }
    }

    /// Build `targets` (object first, then ALI) from `sources`.
    pub fn build(
        &self,
        targets: &[PathBuf],
        sources: &[PathBuf],
    ) -> Result<BuildOutcome, ActionError> {
        let sources = filter_sources(sources);
        let Some(unit) = sources.first() else {
            return Err(ActionError::NoSources);
        };
        debug!("building {:?} from {}", targets, unit.display());

        let compile = self.toolchain.compile_command(targets, &sources)?;
        self.execute(Tool::Compiler, &compile)?;

        let mut outcome = BuildOutcome {
            objects: targets.first().cloned().into_iter().collect(),
            bound: None,
        };

        if !is_entry_point(unit) {
            return Ok(outcome);
        }
        let Some(bind) = self.namer.bind_units(unit) else {
            return Ok(outcome);
        };

        let object_dir = targets.first().and_then(|t| t.parent());
        let Some(ali) = self.summary_of(unit, targets, object_dir) else {
            return Ok(outcome);
        };

        let bind_cmd = self
            .toolchain
            .bind_command(&[bind.body.clone()], &[ali])?;
        self.execute(Tool::Binder, &bind_cmd)?;

        let generated_object = self
            .namer
            .object_artifact(&bind.body, object_dir)
            .into_iter()
            .collect::<Vec<_>>();
        let generated = self.build(&generated_object, &[bind.body.clone()])?;
        outcome.objects.extend(generated.objects);

        remove_generated(&bind)?;
        outcome.bound = Some(bind);

        Ok(outcome)
    }

    /// Link an already built entry point into an executable in the build
    /// directory.
    pub fn link(&self, unit: &Path) -> Result<PathBuf, ActionError> {
        let Some(ali) = self.namer.summary_artifact(unit, None) else {
            return Err(ActionError::NoSources);
        };
        let executable = self.namer.executable(unit);

        let cmd = self
            .toolchain
            .link_command(&[executable.clone()], &[ali])?;
        self.execute(Tool::Linker, &cmd)?;

        Ok(executable)
    }

    /// The ALI target, falling back to the one next to the object.
    fn summary_of(
        &self,
        unit: &Path,
        targets: &[PathBuf],
        object_dir: Option<&Path>,
    ) -> Option<PathBuf> {
        targets
            .get(1)
            .cloned()
            .or_else(|| self.namer.summary_artifact(unit, object_dir))
    }

    fn execute(&self, tool: Tool, cmd: &CommandSpec) -> Result<(), ActionError> {
        let command = cmd.display();
        debug!("{}: {}", tool, command);

        let code = self
            .runner
            .run(cmd)
            .map_err(|source| ActionError::Spawn {
                command: command.clone(),
                source,
            })?;

        if code != 0 {
            return Err(ActionError::ToolFailed {
                tool,
                command,
                code,
            });
        }
        Ok(())
    }
}

fn remove_generated(bind: &BindUnits) -> Result<(), ActionError> {
    for file in bind.files() {
        match std::fs::remove_file(file) {
            Ok(()) => debug!("removed {}", file.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("binder did not produce {}", file.display());
            }
            Err(source) => {
                return Err(ActionError::Cleanup {
                    path: file.to_path_buf(),
                    source,
                })
            }
        }
    }
    Ok(())
}
