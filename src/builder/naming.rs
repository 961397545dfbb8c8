//! Artifact naming.
//!
//! Every source unit maps to exactly one object file and one ALI file, named
//! from the unit's base name plus the configured prefix and suffix and
//! anchored to an output directory. Entry points additionally map to a
//! binder-generated body/spec pair. No function here touches the filesystem.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::unit::{base_name, is_source_file, SourceUnit, UnitKind};
use crate::util::config::Conventions;

/// The transient body/spec pair the binder generates for an entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindUnits {
    /// Generated body (e.g. `b~main.adb`)
    pub body: PathBuf,
    /// Generated spec (e.g. `b~main.ads`)
    pub spec: PathBuf,
}

impl BindUnits {
    /// Body then spec.
    pub fn files(&self) -> [&Path; 2] {
        [&self.body, &self.spec]
    }
}

/// Derives artifact names for source units.
#[derive(Debug, Clone)]
pub struct ArtifactNamer {
    conventions: Conventions,
    build_dir: PathBuf,
}

impl ArtifactNamer {
    /// Create a namer producing artifacts in `build_dir` by default.
    pub fn new(conventions: Conventions, build_dir: impl Into<PathBuf>) -> Self {
        ArtifactNamer {
            conventions,
            build_dir: build_dir.into(),
        }
    }

    /// The default output directory.
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// The naming conventions in use.
    pub fn conventions(&self) -> &Conventions {
        &self.conventions
    }

    /// Object file for `unit`, or `None` if it is not an Ada source.
    pub fn object_artifact(&self, unit: &Path, out_dir: Option<&Path>) -> Option<PathBuf> {
        self.artifact(
            unit,
            out_dir,
            &self.conventions.obj_prefix,
            &self.conventions.obj_suffix,
        )
    }

    /// ALI file for `unit`, or `None` if it is not an Ada source.
    pub fn summary_artifact(&self, unit: &Path, out_dir: Option<&Path>) -> Option<PathBuf> {
        self.artifact(
            unit,
            out_dir,
            &self.conventions.ali_prefix,
            &self.conventions.ali_suffix,
        )
    }

    /// Executable linked from entry point `unit`, in the build directory.
    pub fn executable(&self, unit: &Path) -> PathBuf {
        self.build_dir.join(format!(
            "{}{}",
            base_name(unit),
            std::env::consts::EXE_SUFFIX
        ))
    }

    fn artifact(
        &self,
        unit: &Path,
        out_dir: Option<&Path>,
        prefix: &str,
        suffix: &str,
    ) -> Option<PathBuf> {
        if !is_source_file(unit) {
            return None;
        }

        let dir = self.output_dir(out_dir);
        let name = format!("{}{}{}", prefix, base_name(unit), suffix);
        tracing::trace!("{} -> {}", unit.display(), dir.join(&name).display());
        Some(dir.join(name))
    }

    fn output_dir(&self, out_dir: Option<&Path>) -> PathBuf {
        match out_dir {
            None => self.build_dir.clone(),
            Some(dir) if dir.is_absolute() => dir.to_path_buf(),
            Some(dir) => self.build_dir.join(dir),
        }
    }

    /// Whether `unit` was produced by the binder.
    pub fn is_bind_unit(&self, unit: &Path) -> bool {
        let stem = base_name(unit);
        stem.starts_with(&self.conventions.bind_prefix)
            && stem.ends_with(&self.conventions.bind_suffix)
    }

    /// Binder-generated pair for `unit`.
    ///
    /// Only bodies that are not themselves binder output get a pair. The
    /// pair always lives in the build directory, where the binder runs.
    pub fn bind_units(&self, unit: &Path) -> Option<BindUnits> {
        let source = SourceUnit::new(unit).filter(SourceUnit::is_body)?;
        if self.is_bind_unit(unit) {
            return None;
        }

        let stem = format!(
            "{}{}{}",
            self.conventions.bind_prefix,
            source.base_name(),
            self.conventions.bind_suffix
        );

        Some(BindUnits {
            body: self.build_dir.join(format!("{}{}", stem, UnitKind::Body.suffix())),
            spec: self.build_dir.join(format!("{}{}", stem, UnitKind::Spec.suffix())),
        })
    }
}
