use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::Args;
use log::{debug, error};

use crate::commands::options::{FilterOptions, OutputOptions, load_snapshot};
use crate::printer::print_set;

#[derive(Debug, Args)]
pub struct LsArgs {
    /// Directory to list
    pub dir: PathBuf,

    /// Report what symlinks point to instead of the links themselves
    #[arg(long, short = 'L')]
    pub follow_symlinks: bool,

    /// Hide regular files dated before this unix time
    #[arg(long, value_name = "SECS")]
    pub newer_than: Option<i64>,

    #[command(flatten)]
    pub filter: FilterOptions,

    #[command(flatten)]
    pub output: OutputOptions,
}

pub fn run(args: LsArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            error!("[ls] {e:#}");
            eprintln!("[ls] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: LsArgs) -> Result<ExitCode> {
    let mut set = load_snapshot(&args.dir, args.follow_symlinks)?;

    let filtered = args.filter.apply(&mut set)?;
    let aged = args
        .newer_than
        .map(|t| set.subtract_older_than(t))
        .unwrap_or(0);
    debug!("[ls] filtered {filtered}, aged out {aged}");

    args.output.sort(&mut set);

    let mut printer = args.output.make_printer();
    print_set(printer.as_mut(), "ls", &set)?;

    Ok(ExitCode::SUCCESS)
}
