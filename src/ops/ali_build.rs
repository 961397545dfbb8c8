//! Implementation of `alibuild build`.

use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::builder::executor::{BuildExecutor, BuildReport, MessageFormat};
use crate::core::unit::filter_sources;
use crate::util::fs::collect_sources;
use crate::util::process::ProcessRunner;
use crate::util::GlobalContext;

/// Options for the build command.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Files, directories or glob patterns to build
    pub paths: Vec<PathBuf>,

    /// Link every entry point after compiling
    pub link: bool,

    /// Verbose output
    pub verbose: bool,

    /// How progress is reported
    pub message_format: MessageFormat,
}

/// Build the Ada units named by `opts.paths`.
///
/// Tool failures surface as [`ActionError`](crate::builder::ActionError)
/// inside the returned error so the caller can recover the exit status.
pub fn build(ctx: &GlobalContext, opts: &BuildOptions) -> Result<BuildReport> {
    let sources = collect_sources(ctx.cwd(), &opts.paths)?;
    if filter_sources(&sources).is_empty() {
        bail!(
            "no Ada sources to build\n\
             hint: pass `.adb`/`.ads` files or a directory containing them"
        );
    }

    let config = ctx.load_config();
    ctx.ensure_dir(ctx.build_dir())?;

    let namer = ctx.namer(&config);
    let toolchain = ctx.toolchain(&config);
    let runner = ProcessRunner;

    let report = BuildExecutor::new(&namer, &toolchain, &runner)
        .verbose(opts.verbose)
        .message_format(opts.message_format)
        .link(opts.link)
        .execute(&sources)?;

    Ok(report)
}
