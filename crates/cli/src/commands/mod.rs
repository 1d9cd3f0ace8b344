pub mod diff;
pub mod ls;
pub mod meta;
pub mod options;

use clap::Subcommand;
pub use diff::DiffArgs;
pub use ls::LsArgs;
pub use meta::MetaArgs;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List one directory as a snapshot.
    ///
    /// Example:
    ///   mirrorset ls --sort dirs ./site
    ///   mirrorset ls --glob-exclude '*.tmp' --json /srv/www
    Ls(LsArgs),

    /// Show what a mirror from LOCAL to REMOTE would do.
    ///
    /// Example:
    ///   mirrorset diff ./site /mnt/backup/site
    ///   mirrorset diff --only-newer --precision 2s --delete a b
    Diff(DiffArgs),

    /// Copy dates and permission bits from SOURCE onto matching entries
    /// in TARGET.
    ///
    /// Example:
    ///   mirrorset meta --only-dirs ./site /mnt/backup/site
    Meta(MetaArgs),
}
