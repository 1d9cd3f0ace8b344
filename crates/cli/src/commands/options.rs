use std::{io::Stdout, io::Stderr, path::Path};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use mirrorset_engine::{Comparator, Precision, Snapshot, SortOrder};
use mirrorset_fs::{GlobMatcher, IgnoreFlags, PathMatcher, scan_dir};
use mirrorset_runtime::{DEFAULT_LOOSE_TIME_PRECISION_SECS, DEFAULT_TIME_PRECISION_SECS};
use regex::Regex;

use crate::printer::{
    ColorChoice, EntryPrinter, HumanPrinter, JsonPrinter, OutputFormat, PrinterConfig,
};

/// Scan `dir` one level deep into a snapshot.
pub fn load_snapshot(dir: &Path, follow_symlinks: bool) -> Result<Snapshot> {
    let records = scan_dir(dir, follow_symlinks)
        .with_context(|| format!("failed to scan {}", dir.display()))?;
    let mut set: Snapshot = records.into_iter().collect();
    set.exclude_dots();
    Ok(set)
}

#[derive(Debug, Args)]
pub struct CompareOptions {
    /// Date tolerance for exact dates: N, Ns, Nm, Nh, Nd or inf
    #[arg(long, value_name = "WINDOW", default_value_t = Precision::Seconds(DEFAULT_TIME_PRECISION_SECS))]
    pub precision: Precision,

    /// Date tolerance when either side only has a coarse date
    #[arg(long, value_name = "WINDOW", default_value_t = Precision::Seconds(DEFAULT_LOOSE_TIME_PRECISION_SECS))]
    pub loose_precision: Precision,

    /// Do not compare modification dates
    #[arg(long)]
    pub ignore_time: bool,

    /// Do not compare sizes
    #[arg(long)]
    pub ignore_size: bool,

    /// Treat an entry as up to date when it is older than its counterpart
    #[arg(long)]
    pub only_newer: bool,
}

impl CompareOptions {
    pub fn comparator(&self) -> Comparator {
        let mut ignore = IgnoreFlags::empty();
        ignore.set(IgnoreFlags::DATE, self.ignore_time);
        ignore.set(IgnoreFlags::SIZE, self.ignore_size);
        ignore.set(
            IgnoreFlags::DATE_IF_OLDER | IgnoreFlags::SIZE_IF_OLDER,
            self.only_newer,
        );
        Comparator::new(self.precision, self.loose_precision, ignore)
    }
}

#[derive(Debug, Args)]
pub struct FilterOptions {
    /// Keep only paths matching this regex (rescues excluded paths)
    #[arg(long, value_name = "REGEX")]
    pub include: Option<String>,

    /// Drop paths matching this regex
    #[arg(long, value_name = "REGEX")]
    pub exclude: Option<String>,

    /// Keep only paths matching these globs (gitignore syntax)
    #[arg(long, value_name = "GLOB")]
    pub glob_include: Vec<String>,

    /// Drop paths matching these globs (gitignore syntax)
    #[arg(long, value_name = "GLOB")]
    pub glob_exclude: Vec<String>,
}

fn compile_regex(pattern: Option<&str>) -> Result<Option<Regex>> {
    pattern
        .map(|p| Regex::new(p).with_context(|| format!("invalid regex {p:?}")))
        .transpose()
}

fn compile_globs(patterns: &[String]) -> Result<Option<GlobMatcher>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let globs = GlobMatcher::new(patterns).context("invalid glob pattern")?;
    Ok(Some(globs))
}

impl FilterOptions {
    /// Apply the regex pair, then the glob pair, to `set`. Paths are
    /// matched relative to the scanned directory.
    pub fn apply(&self, set: &mut Snapshot) -> Result<usize> {
        let include = compile_regex(self.include.as_deref())?;
        let exclude = compile_regex(self.exclude.as_deref())?;
        let mut removed = set.filter_by_path(
            "",
            exclude.as_ref().map(|m| m as &dyn PathMatcher),
            include.as_ref().map(|m| m as &dyn PathMatcher),
        );

        let glob_include = compile_globs(&self.glob_include)?;
        let glob_exclude = compile_globs(&self.glob_exclude)?;
        removed += set.filter_by_path(
            "",
            glob_exclude.as_ref().map(|m| m as &dyn PathMatcher),
            glob_include.as_ref().map(|m| m as &dyn PathMatcher),
        );

        Ok(removed)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    #[default]
    Name,
    Size,
    Dirs,
}

impl From<SortKey> for SortOrder {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Name => SortOrder::ByName,
            SortKey::Size => SortOrder::BySize,
            SortKey::Dirs => SortOrder::DirsFirst,
        }
    }
}

#[derive(Debug, Args)]
pub struct OutputOptions {
    /// Output entries as NDJSON (one JSON object per line)
    #[arg(long)]
    pub json: bool,

    /// When to use colors: auto, always, never
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: String,

    /// Suppress the per-set summary
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Order in which entries are printed
    #[arg(long, value_enum, default_value_t = SortKey::Name)]
    pub sort: SortKey,

    /// Compare names case-insensitively when sorting by name
    #[arg(long, short = 'i')]
    pub ignore_case: bool,
}

impl OutputOptions {
    pub fn make_printer(&self) -> Box<dyn EntryPrinter> {
        let format = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        };

        let color = match self.color.as_str() {
            "always" => ColorChoice::Always,
            "never" => ColorChoice::Never,
            _ => ColorChoice::Auto,
        };

        let cfg = PrinterConfig {
            format,
            color,
            quiet: self.quiet,
        };

        match format {
            OutputFormat::Human => Box::new(HumanPrinter::<Stdout, Stderr>::stdout(cfg)),
            OutputFormat::Json => Box::new(JsonPrinter::<Stdout, Stderr>::stdout(cfg)),
        }
    }

    pub fn sort(&self, set: &mut Snapshot) {
        set.sort(self.sort.into(), self.ignore_case);
    }
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;
