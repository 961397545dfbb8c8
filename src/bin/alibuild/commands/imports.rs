//! `alibuild imports` command

use anyhow::Result;

use crate::cli::ImportsArgs;
use alibuild::ops::imports;
use alibuild::util::GlobalContext;

pub fn execute(args: ImportsArgs, _ctx: &GlobalContext) -> Result<()> {
    let reports = imports(&args.files);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    let single = reports.len() == 1;
    for report in &reports {
        if !single {
            println!("{}:", report.unit.display());
        }
        for import in &report.imports {
            if single {
                println!("{}", import);
            } else {
                println!("  {}", import);
            }
        }
    }

    Ok(())
}
