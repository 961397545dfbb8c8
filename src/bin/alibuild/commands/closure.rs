//! `alibuild closure` command

use anyhow::Result;

use crate::cli::ClosureArgs;
use alibuild::ops::closure;
use alibuild::util::fs::relative_path;
use alibuild::util::GlobalContext;

pub fn execute(args: ClosureArgs, ctx: &GlobalContext) -> Result<()> {
    for ali in closure(ctx, &args.file)? {
        println!("{}", relative_path(ctx.cwd(), &ali).display());
    }
    Ok(())
}
