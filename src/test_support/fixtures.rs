//! Test fixtures for common test scenarios.
//!
//! [`AdaProject`] lays out a temporary `src/` tree and an empty `build/`
//! directory, with a namer and toolchain already pointed at `build/`.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::builder::naming::ArtifactNamer;
use crate::builder::toolchain::Toolchain;
use crate::util::config::Config;

/// Spec of the `Greet` package.
pub const GREET_SPEC: &str = "package Greet is\n   procedure Hello;\nend Greet;\n";

/// Body of the `Greet` package.
pub const GREET_BODY: &str = "with Ada.Text_IO;\n\
package body Greet is\n\
   procedure Hello is\n\
   begin\n\
      Ada.Text_IO.Put_Line (\"Hello\");\n\
   end Hello;\n\
end Greet;\n";

/// A main procedure withing `Greet`.
pub const MAIN_BODY: &str = "with Greet;\n\
procedure Main is\n\
begin\n\
   Greet.Hello;\n\
end Main;\n";

/// A temporary Ada project on disk.
pub struct AdaProject {
    tmp: TempDir,
    namer: ArtifactNamer,
    toolchain: Toolchain,
}

impl AdaProject {
    /// Create an empty project with `src/` and `build/` directories.
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Create an empty project using `config` for naming and tools.
    pub fn with_config(config: &Config) -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let build = tmp.path().join("build");
        fs::create_dir_all(tmp.path().join("src")).expect("create src dir");
        fs::create_dir_all(&build).expect("create build dir");

        let namer = ArtifactNamer::new(config.conventions(), &build);
        let toolchain = Toolchain::from_config(config, &build);

        AdaProject {
            tmp,
            namer,
            toolchain,
        }
    }

    /// `main.adb` withing `Greet`, plus `greet.ads` and `greet.adb`.
    pub fn greet_program() -> Self {
        let project = Self::new();
        project.unit("greet.ads", GREET_SPEC);
        project.unit("greet.adb", GREET_BODY);
        project.unit("main.adb", MAIN_BODY);
        project
    }

    /// Write a unit into `src/` and return its path.
    pub fn unit(&self, name: &str, text: &str) -> PathBuf {
        let path = self.src_path(name);
        fs::write(&path, text).expect("write unit");
        path
    }

    /// Project root.
    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    /// Path inside `src/`.
    pub fn src_path(&self, name: &str) -> PathBuf {
        self.tmp.path().join("src").join(name)
    }

    /// Path inside `build/`.
    pub fn build_path(&self, name: &str) -> PathBuf {
        self.tmp.path().join("build").join(name)
    }

    /// Namer producing artifacts in `build/`.
    pub fn namer(&self) -> &ArtifactNamer {
        &self.namer
    }

    /// Toolchain running in `build/`.
    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }
}

impl Default for AdaProject {
    fn default() -> Self {
        Self::new()
    }
}
