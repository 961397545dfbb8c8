//! Lexical scanning of Ada sources.
//!
//! Nothing here parses Ada. Units are inspected line by line with
//! case-insensitive patterns, which is enough to recover the `with` clauses
//! and to tell a main subprogram from a package body.

pub mod classify;
pub mod deps;
pub mod imports;
pub mod siblings;

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

pub use classify::is_entry_point;
pub use deps::scan_dependencies;
pub use imports::scan_imports;
pub use siblings::SiblingIndex;

/// `package body Name is` on a line of its own.
pub(crate) static PACKAGE_BODY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*package\s+body\s+\w+\s+is\s*$").expect("package body pattern")
});

/// `procedure Name is` on a line of its own.
pub(crate) static PROCEDURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*procedure\s+\w+\s+is\s*$").expect("procedure pattern")
});

/// `with A, B.C;` - captures the comma separated unit list.
pub(crate) static WITH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*with\s+([\w.]+(?:\s*,\s*[\w.]+)*)\s*;").expect("with clause pattern")
});

/// Read a unit's text, or `None` if it cannot be read.
///
/// Invalid UTF-8 is replaced rather than rejected; the patterns only care
/// about ASCII keywords and identifiers.
pub(crate) fn read_source(path: &Path) -> Option<String> {
    if !path.exists() {
        return None;
    }

    match std::fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            tracing::warn!("failed to read {}: {}", path.display(), e);
            None
        }
    }
}
