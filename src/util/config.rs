//! Configuration file support for alibuild.
//!
//! Two configuration file locations are read:
//! - Global: `~/.alibuild/config.toml` - User-wide defaults
//! - Project: `.alibuild/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. Search paths from
//! `ADA_INCLUDE_PATH` and `ADA_OBJECTS_PATH` are appended after both files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default Ada compiler driver.
pub const DEFAULT_ADA: &str = "gcc";
/// Default binder.
pub const DEFAULT_ADABIND: &str = "gnatbind";
/// Default linker driver.
pub const DEFAULT_ADALINK: &str = "gnatlink";

/// Default compile command template.
pub const DEFAULT_ADACOM: &str = "$ADA $ADAFLAGS $ADAINCFLAGS -c -o $TARGET $SOURCES";
/// Default bind command template.
pub const DEFAULT_ADABINDCOM: &str = "$ADABIND $ADABINDFLAGS $SOURCES";
/// Default link command template.
pub const DEFAULT_ADALINKCOM: &str = "$ADALINK $ADALINKFLAGS $ADALIBFLAGS -o $TARGET $SOURCES";

/// Environment variable listing extra source directories.
pub const ADA_INCLUDE_PATH: &str = "ADA_INCLUDE_PATH";
/// Environment variable listing extra library directories.
pub const ADA_OBJECTS_PATH: &str = "ADA_OBJECTS_PATH";

/// alibuild configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tool programs and their flags
    pub tools: ToolsConfig,

    /// Command line templates
    pub commands: CommandsConfig,

    /// Artifact naming conventions
    pub naming: NamingConfig,

    /// Search paths
    pub paths: PathsConfig,
}

/// External tools invoked by the build.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Compiler driver (e.g., gcc)
    pub ada: Option<String>,

    /// Binder (e.g., gnatbind)
    pub adabind: Option<String>,

    /// Linker driver (e.g., gnatlink)
    pub adalink: Option<String>,

    /// Flags passed to the compiler
    pub adaflags: Vec<String>,

    /// Flags passed to the binder
    pub adabindflags: Vec<String>,

    /// Flags passed to the linker
    pub adalinkflags: Vec<String>,
}

/// Command templates. See `builder::toolchain` for the variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandsConfig {
    pub adacom: Option<String>,
    pub adabindcom: Option<String>,
    pub adalinkcom: Option<String>,
}

/// Prefixes and suffixes used to name generated files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    pub obj_prefix: Option<String>,
    pub obj_suffix: Option<String>,
    pub ali_prefix: Option<String>,
    pub ali_suffix: Option<String>,
    pub bind_prefix: Option<String>,
    pub bind_suffix: Option<String>,
}

/// Directories searched for sources and libraries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Extra source directories
    pub include: Vec<PathBuf>,

    /// Extra library directories
    pub objects: Vec<PathBuf>,
}

/// Resolved naming conventions for generated files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conventions {
    pub obj_prefix: String,
    pub obj_suffix: String,
    pub ali_prefix: String,
    pub ali_suffix: String,
    pub bind_prefix: String,
    pub bind_suffix: String,
}

impl Default for Conventions {
    fn default() -> Self {
        Conventions {
            obj_prefix: String::new(),
            obj_suffix: ".o".to_string(),
            ali_prefix: String::new(),
            ali_suffix: ".ali".to_string(),
            bind_prefix: "b~".to_string(),
            bind_suffix: String::new(),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        merge_opt(&mut self.tools.ada, other.tools.ada);
        merge_opt(&mut self.tools.adabind, other.tools.adabind);
        merge_opt(&mut self.tools.adalink, other.tools.adalink);
        merge_vec(&mut self.tools.adaflags, other.tools.adaflags);
        merge_vec(&mut self.tools.adabindflags, other.tools.adabindflags);
        merge_vec(&mut self.tools.adalinkflags, other.tools.adalinkflags);

        merge_opt(&mut self.commands.adacom, other.commands.adacom);
        merge_opt(&mut self.commands.adabindcom, other.commands.adabindcom);
        merge_opt(&mut self.commands.adalinkcom, other.commands.adalinkcom);

        merge_opt(&mut self.naming.obj_prefix, other.naming.obj_prefix);
        merge_opt(&mut self.naming.obj_suffix, other.naming.obj_suffix);
        merge_opt(&mut self.naming.ali_prefix, other.naming.ali_prefix);
        merge_opt(&mut self.naming.ali_suffix, other.naming.ali_suffix);
        merge_opt(&mut self.naming.bind_prefix, other.naming.bind_prefix);
        merge_opt(&mut self.naming.bind_suffix, other.naming.bind_suffix);

        merge_vec(&mut self.paths.include, other.paths.include);
        merge_vec(&mut self.paths.objects, other.paths.objects);
    }

    /// Append search paths taken from `ADA_INCLUDE_PATH` / `ADA_OBJECTS_PATH`.
    pub fn with_env_paths(mut self) -> Self {
        self.paths.include.extend(env_paths(ADA_INCLUDE_PATH));
        self.paths.objects.extend(env_paths(ADA_OBJECTS_PATH));
        self
    }

    /// Compiler program.
    pub fn ada(&self) -> &str {
        self.tools.ada.as_deref().unwrap_or(DEFAULT_ADA)
    }

    /// Binder program.
    pub fn adabind(&self) -> &str {
        self.tools.adabind.as_deref().unwrap_or(DEFAULT_ADABIND)
    }

    /// Linker program.
    pub fn adalink(&self) -> &str {
        self.tools.adalink.as_deref().unwrap_or(DEFAULT_ADALINK)
    }

    /// Compile command template.
    pub fn adacom(&self) -> &str {
        self.commands.adacom.as_deref().unwrap_or(DEFAULT_ADACOM)
    }

    /// Bind command template.
    pub fn adabindcom(&self) -> &str {
        self.commands.adabindcom.as_deref().unwrap_or(DEFAULT_ADABINDCOM)
    }

    /// Link command template.
    pub fn adalinkcom(&self) -> &str {
        self.commands.adalinkcom.as_deref().unwrap_or(DEFAULT_ADALINKCOM)
    }

    /// Naming conventions with defaults filled in.
    pub fn conventions(&self) -> Conventions {
        let defaults = Conventions::default();
        let pick = |value: &Option<String>, default: String| value.clone().unwrap_or(default);

        Conventions {
            obj_prefix: pick(&self.naming.obj_prefix, defaults.obj_prefix),
            obj_suffix: pick(&self.naming.obj_suffix, defaults.obj_suffix),
            ali_prefix: pick(&self.naming.ali_prefix, defaults.ali_prefix),
            ali_suffix: pick(&self.naming.ali_suffix, defaults.ali_suffix),
            bind_prefix: pick(&self.naming.bind_prefix, defaults.bind_prefix),
            bind_suffix: pick(&self.naming.bind_suffix, defaults.bind_suffix),
        }
    }
}

fn merge_opt<T>(slot: &mut Option<T>, other: Option<T>) {
    if other.is_some() {
        *slot = other;
    }
}

fn merge_vec<T>(slot: &mut Vec<T>, other: Vec<T>) {
    if !other.is_empty() {
        *slot = other;
    }
}

/// Split a path-list environment variable, dropping empty entries.
pub fn env_paths(var: &str) -> Vec<PathBuf> {
    std::env::var_os(var)
        .map(|value| {
            std::env::split_paths(&value)
                .filter(|p| !p.as_os_str().is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.alibuild/config.toml)
/// 2. Global config (~/.alibuild/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    // Load global config first
    if global_path.exists() {
        let global = Config::load_or_default(global_path);
        config.merge(global);
    }

    // Project config overrides global
    if project_path.exists() {
        let project = Config::load_or_default(project_path);
        config.merge(project);
    }

    config
}

/// Get the global alibuild config directory (~/.alibuild).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".alibuild"))
}

/// Get the global config path (~/.alibuild/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.alibuild/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".alibuild").join("config.toml")
}
