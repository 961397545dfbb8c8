//! GNAT toolchain command lines.
//!
//! Commands are produced from configurable templates such as
//! `$ADA $ADAFLAGS -c -o $TARGET $SOURCES`. Templates are split on
//! whitespace; a token that is exactly one list variable expands into one
//! argument per element, any other token has its variables substituted in
//! place.
//!
//! | Variable        | Value                                  |
//! |-----------------|----------------------------------------|
//! | `$ADA`          | compiler program                       |
//! | `$ADABIND`      | binder program                         |
//! | `$ADALINK`      | linker program                         |
//! | `$ADAFLAGS`     | compiler flags                         |
//! | `$ADABINDFLAGS` | binder flags                           |
//! | `$ADALINKFLAGS` | linker flags                           |
//! | `$ADAINCFLAGS`  | `-I<dir>` per include directory        |
//! | `$ADALIBFLAGS`  | `-L<dir>` per library directory        |
//! | `$TARGET`       | first target                           |
//! | `$TARGETS`      | all targets                            |
//! | `$SOURCE`       | first source                           |
//! | `$SOURCES`      | all sources                            |

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::util::config::Config;

static VARIABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\{(\w+)\}|(\w+))").expect("template variable pattern")
});

/// A command ready to be executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSpec {
    /// The program to run (e.g., "gcc", "gnatbind")
    pub program: PathBuf,
    /// Command arguments
    pub args: Vec<String>,
    /// Working directory
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    /// Create a new command spec.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        CommandSpec {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Add multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(|a| a.into()));
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// The command line as a single string, for logs and messages.
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Error expanding a command template.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unknown variable `${name}` in command template `{template}`")]
    UnknownVariable { name: String, template: String },

    #[error("command template `{template}` expands to an empty command")]
    Empty { template: String },
}

enum Value {
    Scalar(String),
    List(Vec<String>),
}

impl Value {
    fn joined(&self) -> String {
        match self {
            Value::Scalar(s) => s.clone(),
            Value::List(items) => items.join(" "),
        }
    }

    fn into_args(self) -> Vec<String> {
        match self {
            Value::Scalar(s) if s.is_empty() => Vec::new(),
            Value::Scalar(s) => vec![s],
            Value::List(items) => items,
        }
    }
}

/// The compiler, binder and linker with their templates and flags.
#[derive(Debug, Clone)]
pub struct Toolchain {
    pub ada: String,
    pub adabind: String,
    pub adalink: String,
    pub adaflags: Vec<String>,
    pub adabindflags: Vec<String>,
    pub adalinkflags: Vec<String>,
    pub include_dirs: Vec<PathBuf>,
    pub library_dirs: Vec<PathBuf>,
    pub adacom: String,
    pub adabindcom: String,
    pub adalinkcom: String,
    /// Directory commands run in; the binder writes its output here.
    pub cwd: PathBuf,
}

impl Toolchain {
    /// Build a toolchain from configuration, running tools in `build_dir`.
    pub fn from_config(config: &Config, build_dir: &Path) -> Self {
        Toolchain {
            ada: config.ada().to_string(),
            adabind: config.adabind().to_string(),
            adalink: config.adalink().to_string(),
            adaflags: config.tools.adaflags.clone(),
            adabindflags: config.tools.adabindflags.clone(),
            adalinkflags: config.tools.adalinkflags.clone(),
            include_dirs: config.paths.include.clone(),
            library_dirs: config.paths.objects.clone(),
            adacom: config.adacom().to_string(),
            adabindcom: config.adabindcom().to_string(),
            adalinkcom: config.adalinkcom().to_string(),
            cwd: build_dir.to_path_buf(),
        }
    }

    /// Compile `sources` into `targets`.
    pub fn compile_command(
        &self,
        targets: &[PathBuf],
        sources: &[PathBuf],
    ) -> Result<CommandSpec, TemplateError> {
        self.expand(&self.adacom, targets, sources)
    }

    /// Bind the ALI files in `sources`.
    pub fn bind_command(
        &self,
        targets: &[PathBuf],
        sources: &[PathBuf],
    ) -> Result<CommandSpec, TemplateError> {
        self.expand(&self.adabindcom, targets, sources)
    }

    /// Link the ALI files in `sources` into the executable `targets[0]`.
    pub fn link_command(
        &self,
        targets: &[PathBuf],
        sources: &[PathBuf],
    ) -> Result<CommandSpec, TemplateError> {
        self.expand(&self.adalinkcom, targets, sources)
    }

    fn lookup(&self, name: &str, targets: &[PathBuf], sources: &[PathBuf]) -> Option<Value> {
        let paths = |list: &[PathBuf]| -> Vec<String> {
            list.iter().map(|p| p.to_string_lossy().into_owned()).collect()
        };
        let first = |list: &[PathBuf]| -> String {
            list.first()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default()
        };
        let dir_flags = |flag: &str, dirs: &[PathBuf]| -> Vec<String> {
            dirs.iter()
                .map(|d| format!("{}{}", flag, d.display()))
                .collect()
        };

        let value = match name {
            "ADA" => Value::Scalar(self.ada.clone()),
            "ADABIND" => Value::Scalar(self.adabind.clone()),
            "ADALINK" => Value::Scalar(self.adalink.clone()),
            "ADAFLAGS" => Value::List(self.adaflags.clone()),
            "ADABINDFLAGS" => Value::List(self.adabindflags.clone()),
            "ADALINKFLAGS" => Value::List(self.adalinkflags.clone()),
            "ADAINCFLAGS" => Value::List(dir_flags("-I", &self.include_dirs)),
            "ADALIBFLAGS" => Value::List(dir_flags("-L", &self.library_dirs)),
            "TARGET" => Value::Scalar(first(targets)),
            "TARGETS" => Value::List(paths(targets)),
            "SOURCE" => Value::Scalar(first(sources)),
            "SOURCES" => Value::List(paths(sources)),
            _ => return None,
        };
        Some(value)
    }

    fn expand(
        &self,
        template: &str,
        targets: &[PathBuf],
        sources: &[PathBuf],
    ) -> Result<CommandSpec, TemplateError> {
        let unknown = |name: &str| TemplateError::UnknownVariable {
            name: name.to_string(),
            template: template.to_string(),
        };

        let mut words = Vec::new();
        for token in template.split_whitespace() {
            let captures: Vec<_> = VARIABLE_RE.captures_iter(token).collect();

            // A token that is a single variable may expand to several words.
            if let [caps] = captures.as_slice() {
                if caps.get(0).map(|m| m.as_str()) == Some(token) {
                    let name = caps.get(1).or(caps.get(2)).map_or("", |m| m.as_str());
                    let value = self
                        .lookup(name, targets, sources)
                        .ok_or_else(|| unknown(name))?;
                    words.extend(value.into_args());
                    continue;
                }
            }

            let mut word = String::new();
            let mut last = 0;
            for caps in &captures {
                let Some(whole) = caps.get(0) else {
                    continue;
                };
                let name = caps.get(1).or(caps.get(2)).map_or("", |m| m.as_str());
                let value = self
                    .lookup(name, targets, sources)
                    .ok_or_else(|| unknown(name))?;
                word.push_str(&token[last..whole.start()]);
                word.push_str(&value.joined());
                last = whole.end();
            }
            word.push_str(&token[last..]);

            if !word.is_empty() {
                words.push(word);
            }
        }

        let mut words = words.into_iter();
        let program = words.next().ok_or_else(|| TemplateError::Empty {
            template: template.to_string(),
        })?;

        Ok(CommandSpec::new(program).args(words).cwd(&self.cwd))
    }
}
