//! `alibuild doctor` command

use anyhow::Result;

use alibuild::ops::doctor;
use alibuild::util::GlobalContext;

pub fn execute(ctx: &GlobalContext) -> Result<()> {
    let report = doctor(ctx);

    print!("{}", report.render(ctx.is_verbose()));

    if !report.all_required_passed() {
        std::process::exit(1);
    }

    Ok(())
}
