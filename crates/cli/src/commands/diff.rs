use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::Args;
use log::{debug, error};
use mirrorset_engine::{Comparator, Snapshot};

use crate::commands::options::{CompareOptions, FilterOptions, OutputOptions, load_snapshot};
use crate::printer::print_set;

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Source side of the mirror
    pub local: PathBuf,

    /// Destination side of the mirror
    pub remote: PathBuf,

    /// Compare what symlinks point to instead of the links themselves
    #[arg(long, short = 'L')]
    pub follow_symlinks: bool,

    /// Also list destination entries missing from the source
    #[arg(long)]
    pub delete: bool,

    /// Mirror from REMOTE to LOCAL instead
    #[arg(long, short = 'R')]
    pub reverse: bool,

    /// Never transfer regular files dated before this unix time
    #[arg(long, value_name = "SECS")]
    pub newer_than: Option<i64>,

    /// List entries that are already up to date
    #[arg(long)]
    pub show_same: bool,

    #[command(flatten)]
    pub compare: CompareOptions,

    #[command(flatten)]
    pub filter: FilterOptions,

    #[command(flatten)]
    pub output: OutputOptions,
}

/// The three answers of a mirror plan.
#[derive(Debug, Default)]
pub struct MirrorPlan {
    /// Source entries missing or different at the destination.
    pub upload: Snapshot,
    /// Destination entries with no source counterpart.
    pub delete: Snapshot,
    /// Source entries present at the destination and matching it.
    pub same: Snapshot,
}

impl MirrorPlan {
    pub fn build(
        source: &Snapshot,
        dest: &Snapshot,
        cmp: &Comparator,
        newer_than: Option<i64>,
    ) -> Self {
        let mut differing = source.clone();
        differing.subtract_same(dest, cmp);

        let mut same = source.clone();
        same.subtract_not_in(dest);
        same.subtract_any(&differing);

        let mut upload = differing;
        if let Some(t) = newer_than {
            upload.subtract_older_than(t);
        }

        let mut delete = dest.clone();
        delete.subtract_any(source);

        debug!(
            "[diff] upload {}, delete {}, same {}",
            upload.len(),
            delete.len(),
            same.len()
        );

        MirrorPlan {
            upload,
            delete,
            same,
        }
    }

    /// Nothing to transfer and, when deletions count, nothing to remove.
    pub fn is_clean(&self, with_delete: bool) -> bool {
        self.upload.is_empty() && (!with_delete || self.delete.is_empty())
    }
}

pub fn run(args: DiffArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            error!("[diff] {e:#}");
            eprintln!("[diff] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: DiffArgs) -> Result<ExitCode> {
    let (src_dir, dst_dir) = if args.reverse {
        (&args.remote, &args.local)
    } else {
        (&args.local, &args.remote)
    };

    let mut source = load_snapshot(src_dir, args.follow_symlinks)?;
    let mut dest = load_snapshot(dst_dir, args.follow_symlinks)?;
    args.filter.apply(&mut source)?;
    args.filter.apply(&mut dest)?;

    let cmp = args.compare.comparator();
    debug!("[diff] comparing with {:?}", cmp);

    let mut plan = MirrorPlan::build(&source, &dest, &cmp, args.newer_than);

    let mut printer = args.output.make_printer();
    args.output.sort(&mut plan.upload);
    print_set(printer.as_mut(), "upload", &plan.upload)?;

    if args.delete {
        args.output.sort(&mut plan.delete);
        print_set(printer.as_mut(), "delete", &plan.delete)?;
    }
    if args.show_same {
        args.output.sort(&mut plan.same);
        print_set(printer.as_mut(), "same", &plan.same)?;
    }

    if plan.is_clean(args.delete) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

#[cfg(test)]
#[path = "diff_tests.rs"]
mod tests;
