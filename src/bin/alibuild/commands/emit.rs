//! `alibuild emit` command

use anyhow::Result;

use crate::cli::EmitArgs;
use alibuild::ops::emit;
use alibuild::util::fs::relative_path;
use alibuild::util::GlobalContext;

pub fn execute(args: EmitArgs, ctx: &GlobalContext) -> Result<()> {
    let plan = emit(ctx, &args.paths)?;

    if args.json {
        println!("{}", plan.to_json()?);
        return Ok(());
    }

    let rel = |p: &std::path::Path| relative_path(ctx.cwd(), p).display().to_string();

    println!("targets:");
    for target in &plan.targets {
        println!("  {}", rel(target));
    }

    if !plan.entry_points.is_empty() {
        println!("entry points:");
        for unit in &plan.entry_points {
            println!("  {}", rel(unit));
        }
    }

    if !plan.edges.is_empty() {
        println!("dependencies:");
        for edge in &plan.edges {
            println!("  {} -> {}", rel(&edge.target), rel(&edge.requires));
        }
    }

    Ok(())
}
