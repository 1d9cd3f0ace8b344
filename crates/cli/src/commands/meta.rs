use std::{fmt, path::PathBuf, process::ExitCode, str::FromStr};

use anyhow::Result;
use clap::Args;
use log::{error, info};
use mirrorset_runtime::DEFAULT_CHMOD_MASK;

use crate::commands::options::load_snapshot;

#[derive(Debug, Args)]
pub struct MetaArgs {
    /// Directory whose dates and modes are copied
    pub source: PathBuf,

    /// Directory whose entries receive them
    pub target: PathBuf,

    /// Only restore dates on directories
    #[arg(long)]
    pub only_dirs: bool,

    /// Permission bits cleared before applying modes (octal)
    #[arg(long, value_name = "OCTAL", default_value_t = ChmodMask(DEFAULT_CHMOD_MASK))]
    pub chmod_mask: ChmodMask,

    /// Leave permission bits alone
    #[arg(long)]
    pub skip_modes: bool,

    /// Leave modification dates alone
    #[arg(long)]
    pub skip_times: bool,

    /// Read attributes of what symlinks point to
    #[arg(long, short = 'L')]
    pub follow_symlinks: bool,
}

/// Permission mask written and read in octal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChmodMask(pub u32);

impl fmt::Display for ChmodMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03o}", self.0)
    }
}

impl FromStr for ChmodMask {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_octal(s).map(ChmodMask)
    }
}

pub(crate) fn parse_octal(s: &str) -> Result<u32, String> {
    let digits = s.strip_prefix("0o").unwrap_or(s);
    u32::from_str_radix(digits, 8)
        .ok()
        .filter(|m| *m <= 0o7777)
        .ok_or_else(|| format!("invalid octal mask {s:?}"))
}

pub fn run(args: MetaArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            error!("[meta] {e:#}");
            eprintln!("[meta] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: MetaArgs) -> Result<ExitCode> {
    let mut source = load_snapshot(&args.source, args.follow_symlinks)?;
    let target = load_snapshot(&args.target, false)?;
    let missing = source.subtract_not_in(&target);

    let modes = if args.skip_modes {
        0
    } else {
        source.apply_modes(&args.target, args.chmod_mask.0)
    };
    let times = if args.skip_times {
        0
    } else {
        source.apply_times(&args.target, args.only_dirs)
    };

    info!(
        "[meta] mask {}, {missing} source entries not in target",
        args.chmod_mask
    );
    println!("{times} dates and {modes} modes updated");

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
#[path = "meta_tests.rs"]
mod tests;
