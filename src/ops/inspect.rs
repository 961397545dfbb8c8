//! Read-only queries over Ada units: `imports`, `classify`, `closure`, `deps`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use serde::Serialize;

use crate::builder::closure::ClosureResolver;
use crate::core::unit::is_source_file;
use crate::scan::{is_entry_point, scan_dependencies, scan_imports};
use crate::util::GlobalContext;

/// Units named by a source's `with` clauses.
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub unit: PathBuf,
    pub imports: Vec<String>,
}

/// Whether a source is a main program.
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub unit: PathBuf,
    pub entry_point: bool,
}

/// Imports of each unit, in argument order.
pub fn imports(units: &[PathBuf]) -> Vec<ImportReport> {
    units
        .iter()
        .map(|unit| ImportReport {
            unit: unit.clone(),
            imports: scan_imports(unit),
        })
        .collect()
}

/// Classification of each unit, in argument order.
pub fn classify(units: &[PathBuf]) -> Vec<Classification> {
    units
        .iter()
        .map(|unit| Classification {
            unit: unit.clone(),
            entry_point: is_entry_point(unit),
        })
        .collect()
}

/// ALI files `unit` transitively depends on, dependencies first.
pub fn closure(ctx: &GlobalContext, unit: &Path) -> Result<Vec<PathBuf>> {
    if !is_source_file(unit) {
        bail!(
            "`{}` is not an Ada source\n\
             hint: expected a `.adb` or `.ads` file",
            unit.display()
        );
    }

    let config = ctx.load_config();
    let namer = ctx.namer(&config);
    Ok(ClosureResolver::new(&namer).closure(unit))
}

/// Source files `unit` depends on across the unit's directory and the
/// configured include path.
pub fn deps(ctx: &GlobalContext, unit: &Path) -> Vec<PathBuf> {
    let config = ctx.load_config();

    let unit_dir = match unit.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut search_path = vec![unit_dir];
    for dir in config.paths.include {
        if !search_path.contains(&dir) {
            search_path.push(dir);
        }
    }

    scan_dependencies(unit, &search_path)
}
