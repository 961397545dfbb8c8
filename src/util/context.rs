//! Global context for alibuild operations.
//!
//! Provides centralized access to configuration, paths, and environment.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::builder::naming::ArtifactNamer;
use crate::builder::toolchain::Toolchain;
use crate::util::config::{self, Config};

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Directory receiving objects, ALI files and binder output
    build_dir: Option<PathBuf>,

    /// Whether to use verbose output
    verbose: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext rooted at the current directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        GlobalContext {
            cwd,
            build_dir: None,
            verbose: false,
        }
    }

    /// Override the build directory. Relative paths are taken from the cwd.
    pub fn set_build_dir(&mut self, dir: Option<PathBuf>) {
        self.build_dir = dir.map(|d| self.cwd.join(d));
    }

    /// Set verbose mode.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// The build directory, defaulting to the cwd.
    pub fn build_dir(&self) -> &Path {
        self.build_dir.as_deref().unwrap_or(&self.cwd)
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> Option<PathBuf> {
        config::global_config_path()
    }

    /// Get the project configuration file path.
    pub fn project_config_path(&self) -> PathBuf {
        config::project_config_path(&self.cwd)
    }

    /// Load global and project configuration, then the environment's
    /// search paths.
    pub fn load_config(&self) -> Config {
        let global = self.config_path().unwrap_or_default();
        config::load_config(&global, &self.project_config_path()).with_env_paths()
    }

    /// Artifact namer for `config`, anchored at the build directory.
    pub fn namer(&self, config: &Config) -> ArtifactNamer {
        ArtifactNamer::new(config.conventions(), self.build_dir())
    }

    /// Toolchain for `config`, running in the build directory.
    pub fn toolchain(&self, config: &Config) -> Toolchain {
        Toolchain::from_config(config, self.build_dir())
    }

    /// Ensure a directory exists, creating it if necessary.
    pub fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::create_dir_all(path)
                .with_context(|| format!("failed to create directory: {}", path.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_context_paths() {
        let ctx = GlobalContext::new().unwrap();
        assert!(ctx.cwd().is_absolute());
        assert_eq!(ctx.build_dir(), ctx.cwd());
        assert!(ctx.project_config_path().ends_with(".alibuild/config.toml"));
    }

    #[test]
    fn test_build_dir_override() {
        let mut ctx = GlobalContext::with_cwd(PathBuf::from("/work"));
        ctx.set_build_dir(Some(PathBuf::from("obj")));
        assert_eq!(ctx.build_dir(), Path::new("/work/obj"));

        ctx.set_build_dir(Some(PathBuf::from("/tmp/out")));
        assert_eq!(ctx.build_dir(), Path::new("/tmp/out"));

        let namer = ctx.namer(&Config::default());
        assert_eq!(namer.build_dir(), Path::new("/tmp/out"));
    }

    #[test]
    fn test_project_config_is_loaded() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join(".alibuild")).unwrap();
        std::fs::write(
            tmp.path().join(".alibuild/config.toml"),
            "[tools]\nadabind = \"my-gnatbind\"\n",
        )
        .unwrap();

        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf());
        let config = ctx.load_config();
        assert_eq!(config.adabind(), "my-gnatbind");
        assert_eq!(ctx.toolchain(&config).adabind, "my-gnatbind");
    }

    #[test]
    fn test_ensure_dir() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf());
        let dir = tmp.path().join("build/obj");
        ctx.ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }
}
