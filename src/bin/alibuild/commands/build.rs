//! `alibuild build` command

use anyhow::Result;

use crate::cli::BuildArgs;
use alibuild::builder::MessageFormat;
use alibuild::ops::ali_build::{build, BuildOptions};
use alibuild::util::GlobalContext;

pub fn execute(args: BuildArgs, ctx: &GlobalContext) -> Result<()> {
    let message_format: MessageFormat = args.message_format.into();

    let opts = BuildOptions {
        paths: args.paths,
        link: args.link,
        verbose: ctx.is_verbose(),
        message_format,
    };

    let report = build(ctx, &opts)?;

    if message_format == MessageFormat::Human {
        for exe in &report.executables {
            eprintln!("     Created {}", exe.display());
        }
    }

    Ok(())
}
