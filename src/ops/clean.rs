//! Implementation of `alibuild clean`.

use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use crate::core::unit::filter_sources;
use crate::util::fs::{collect_sources, remove_file_if_exists};
use crate::util::GlobalContext;

/// Options for the clean command.
#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    /// Files, directories or glob patterns whose artifacts are removed
    pub paths: Vec<PathBuf>,

    /// Report what would be removed without removing it
    pub dry_run: bool,
}

/// Remove the objects and ALI files of every unit, plus binder output left
/// behind by a failed build. Returns the files removed (or that would be).
pub fn clean(ctx: &GlobalContext, opts: &CleanOptions) -> Result<Vec<PathBuf>> {
    let sources = filter_sources(&collect_sources(ctx.cwd(), &opts.paths)?);
    let config = ctx.load_config();
    let namer = ctx.namer(&config);

    let mut candidates = Vec::new();
    for unit in &sources {
        candidates.extend(namer.object_artifact(unit, None));
        candidates.extend(namer.summary_artifact(unit, None));

        if let Some(bind) = namer.bind_units(unit) {
            candidates.extend(namer.object_artifact(&bind.body, None));
            candidates.extend(namer.summary_artifact(&bind.body, None));
            candidates.push(bind.body);
            candidates.push(bind.spec);
        }
    }

    let mut removed = Vec::new();
    for file in candidates {
        if opts.dry_run {
            if file.exists() {
                removed.push(file);
            }
            continue;
        }
        if remove_file_if_exists(&file)? {
            debug!("removed {}", file.display());
            removed.push(file);
        }
    }

    Ok(removed)
}
