//! `alibuild deps` command

use anyhow::{bail, Result};

use crate::cli::DepsArgs;
use alibuild::ops::deps;
use alibuild::util::GlobalContext;

pub fn execute(args: DepsArgs, ctx: &GlobalContext) -> Result<()> {
    if !args.file.exists() {
        bail!("`{}` does not exist", args.file.display());
    }

    for dep in deps(ctx, &args.file) {
        println!("{}", dep.display());
    }
    Ok(())
}
