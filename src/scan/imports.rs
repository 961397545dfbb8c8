//! Import (`with` clause) scanning.

use std::path::Path;

use tracing::debug;

use super::{read_source, WITH_RE};

/// Scan a unit and return every name imported with a `with` clause.
///
/// Names are returned in file order and are not deduplicated: a unit that
/// withs the same name twice yields it twice. A missing file has no imports.
pub fn scan_imports(path: &Path) -> Vec<String> {
    debug!("scanning imports of {}", path.display());

    let Some(text) = read_source(path) else {
        return Vec::new();
    };

    let imports: Vec<String> = text
        .lines()
        .filter_map(|line| WITH_RE.captures(line))
        .filter_map(|caps| caps.get(1))
        .flat_map(|names| {
            names
                .as_str()
                .split(',')
                .map(|name| name.trim().to_string())
                .collect::<Vec<_>>()
        })
        .collect();

    debug!("{} imports {:?}", path.display(), imports);
    imports
}
