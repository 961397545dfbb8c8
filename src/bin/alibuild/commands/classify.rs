//! `alibuild classify` command

use anyhow::Result;

use crate::cli::ClassifyArgs;
use alibuild::ops::classify;
use alibuild::util::GlobalContext;

pub fn execute(args: ClassifyArgs, _ctx: &GlobalContext) -> Result<()> {
    let classes = classify(&args.files);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&classes)?);
        return Ok(());
    }

    for class in &classes {
        let kind = if class.entry_point {
            "entry-point"
        } else {
            "library"
        };
        println!("{}\t{}", class.unit.display(), kind);
    }

    Ok(())
}
