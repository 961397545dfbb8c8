//! alibuild CLI - dependency scanning and builds for GNAT-style Ada sources

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use alibuild::builder::ActionError;
use alibuild::util::GlobalContext;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        let code = e
            .downcast_ref::<ActionError>()
            .map(ActionError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("alibuild=debug")
    } else {
        EnvFilter::new("alibuild=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let mut ctx = GlobalContext::new()?;
    ctx.set_verbose(cli.verbose);
    ctx.set_build_dir(cli.build_dir);

    // Execute command
    match cli.command {
        Commands::Imports(args) => commands::imports::execute(args, &ctx),
        Commands::Classify(args) => commands::classify::execute(args, &ctx),
        Commands::Closure(args) => commands::closure::execute(args, &ctx),
        Commands::Deps(args) => commands::deps::execute(args, &ctx),
        Commands::Emit(args) => commands::emit::execute(args, &ctx),
        Commands::Build(args) => commands::build::execute(args, &ctx),
        Commands::Clean(args) => commands::clean::execute(args, &ctx),
        Commands::Doctor => commands::doctor::execute(&ctx),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
