use std::process::ExitCode;

use clap::Parser;
use log::Level;

mod commands;
mod printer;

use commands::Command;
use mirrorset_runtime::{PROGRAM_NAME, logging};

#[derive(Debug, Parser)]
#[command(
    name = PROGRAM_NAME,
    version,
    about = "Directory snapshots and mirror diffs"
)]
pub struct Cli {
    /// Log at debug level, overriding MIRRORSET_LOG_LEVEL
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        logging::init_with_level(Level::Debug).ok();
    } else {
        logging::init().ok();
    }

    match cli.command {
        Command::Ls(args) => commands::ls::run(args),
        Command::Diff(args) => commands::diff::run(args),
        Command::Meta(args) => commands::meta::run(args),
    }
}
