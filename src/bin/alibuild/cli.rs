//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use alibuild::builder::MessageFormat;

/// alibuild - dependency scanner, target emitter and build driver for Ada
#[derive(Parser)]
#[command(name = "alibuild")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory for objects, ALI files and binder output [default: .]
    #[arg(long, global = true, env = "ALIBUILD_BUILD_DIR")]
    pub build_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the units named by `with` clauses
    Imports(ImportsArgs),

    /// Tell main programs from library units
    Classify(ClassifyArgs),

    /// Show the ALI files a unit transitively depends on
    Closure(ClosureArgs),

    /// Show the source files a unit depends on across the search path
    Deps(DepsArgs),

    /// Show the targets and dependency edges a compile step produces
    Emit(EmitArgs),

    /// Compile, bind and optionally link Ada units
    Build(BuildArgs),

    /// Remove objects, ALI files and stale binder output
    Clean(CleanArgs),

    /// Check that the configured tools are available
    Doctor,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct ImportsArgs {
    /// Ada source files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ClassifyArgs {
    /// Ada source files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ClosureArgs {
    /// Ada source file
    pub file: PathBuf,
}

#[derive(Args)]
pub struct DepsArgs {
    /// Ada source file
    pub file: PathBuf,
}

#[derive(Args)]
pub struct EmitArgs {
    /// Source files, directories or glob patterns
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct BuildArgs {
    /// Source files, directories or glob patterns
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Link every main program after compiling
    #[arg(long)]
    pub link: bool,

    /// Progress output format
    #[arg(long, value_enum, default_value = "human")]
    pub message_format: MessageFormatArg,
}

#[derive(Args)]
pub struct CleanArgs {
    /// Source files, directories or glob patterns
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Only list what would be removed
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// `--message-format` values.
#[derive(Clone, Copy, ValueEnum)]
pub enum MessageFormatArg {
    Human,
    Json,
}

impl From<MessageFormatArg> for MessageFormat {
    fn from(arg: MessageFormatArg) -> Self {
        match arg {
            MessageFormatArg::Human => MessageFormat::Human,
            MessageFormatArg::Json => MessageFormat::Json,
        }
    }
}
