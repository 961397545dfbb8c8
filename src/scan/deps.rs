//! Source-level dependency scanning across a search path.
//!
//! This is the scan a build engine runs on every `.adb`, `.ads` and `.ali`
//! node to keep body/spec and `with` edges current between builds. Unlike
//! the closure resolver it walks the whole search path.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use super::imports::scan_imports;
use super::siblings::SiblingIndex;
use crate::core::unit::{base_name, SourceUnit, SOURCE_SUFFIXES};

/// Files `node` depends on: its sister unit and every withed unit found in
/// the search path directories, in discovery order.
pub fn scan_dependencies(node: &Path, search_path: &[PathBuf]) -> Vec<PathBuf> {
    debug!("scanning dependencies of {}", node.display());

    let imports = scan_imports(node);
    let stem = base_name(node);
    // A unit pulls its sister kind; any other node (e.g. an ALI) pulls both.
    let sister_suffixes: Vec<&str> = match SourceUnit::new(node) {
        Some(unit) => vec![unit.kind.sister().suffix()],
        None => SOURCE_SUFFIXES.to_vec(),
    };
    let mut deps = Vec::new();

    for dir in search_path {
        if !dir.exists() {
            trace!("skipping missing search directory {}", dir.display());
            continue;
        }

        let index = SiblingIndex::read(dir);

        for suffix in &sister_suffixes {
            if let Some(sister) = index.find(&format!("{}{}", stem, suffix)) {
                deps.push(sister);
            }
        }

        for import in &imports {
            deps.extend(index.units_named(import));
        }
    }

    debug!("{} depends on {:?}", node.display(), deps);
    deps
}
