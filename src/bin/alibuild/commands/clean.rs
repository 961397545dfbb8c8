//! `alibuild clean` command

use anyhow::Result;

use crate::cli::CleanArgs;
use alibuild::ops::{clean, CleanOptions};
use alibuild::util::GlobalContext;

pub fn execute(args: CleanArgs, ctx: &GlobalContext) -> Result<()> {
    let opts = CleanOptions {
        paths: args.paths,
        dry_run: args.dry_run,
    };

    let removed = clean(ctx, &opts)?;

    if opts.dry_run {
        for file in &removed {
            println!("would remove {}", file.display());
        }
    } else {
        eprintln!("     Removed {} file(s)", removed.len());
    }

    Ok(())
}
