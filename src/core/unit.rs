//! Source units - the compilable files of an Ada build.
//!
//! A unit is either a body (`.adb`) or a spec (`.ads`). A body and a spec
//! sharing a base name are logically paired but remain independent build
//! nodes.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Suffix of a unit body.
pub const BODY_SUFFIX: &str = ".adb";

/// Suffix of a unit spec.
pub const SPEC_SUFFIX: &str = ".ads";

/// Recognized source suffixes, in lookup order.
pub const SOURCE_SUFFIXES: [&str; 2] = [BODY_SUFFIX, SPEC_SUFFIX];

/// The kind of a source unit, inferred from its suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    /// Implementation (`.adb`)
    Body,
    /// Specification (`.ads`)
    Spec,
}

impl UnitKind {
    /// Infer the unit kind from a path. Suffix matching is exact.
    pub fn from_path(path: &Path) -> Option<UnitKind> {
        match suffix_of(path)?.as_str() {
            BODY_SUFFIX => Some(UnitKind::Body),
            SPEC_SUFFIX => Some(UnitKind::Spec),
            _ => None,
        }
    }

    /// The file suffix for this kind, including the leading dot.
    pub fn suffix(&self) -> &'static str {
        match self {
            UnitKind::Body => BODY_SUFFIX,
            UnitKind::Spec => SPEC_SUFFIX,
        }
    }

    /// The kind of the paired unit.
    pub fn sister(&self) -> UnitKind {
        match self {
            UnitKind::Body => UnitKind::Spec,
            UnitKind::Spec => UnitKind::Body,
        }
    }
}

/// A compilable unit identified by its path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceUnit {
    /// Path to the unit
    pub path: PathBuf,
    /// Body or spec
    pub kind: UnitKind,
}

impl SourceUnit {
    /// Create a source unit, returning `None` for unrecognized suffixes.
    pub fn new(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let kind = UnitKind::from_path(&path)?;
        Some(SourceUnit { path, kind })
    }

    /// File name without directory and extension.
    pub fn base_name(&self) -> String {
        base_name(&self.path)
    }

    /// Whether this is a body unit.
    pub fn is_body(&self) -> bool {
        self.kind == UnitKind::Body
    }
}

/// Extension of a path including the leading dot (e.g. `.adb`).
pub fn suffix_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
}

/// File name without directory and without its last extension.
pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Whether the path carries one of the recognized source suffixes.
pub fn is_source_file(path: &Path) -> bool {
    UnitKind::from_path(path).is_some()
}

/// Keep only recognized source units, collapsing units that share a base
/// name (compared case-insensitively). The first occurrence wins, so a body
/// followed by its spec yields only the body.
pub fn filter_sources<P: AsRef<Path>>(sources: &[P]) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut filtered = Vec::new();

    for source in sources {
        let source = source.as_ref();
        if !is_source_file(source) {
            continue;
        }
        let key = base_name(source).to_uppercase();
        if seen.insert(key) {
            filtered.push(source.to_path_buf());
        }
    }

    filtered
}
