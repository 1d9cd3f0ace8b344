use std::io::{self, Write};

use chrono::{DateTime, Local};
use mirrorset_engine::{KindCounts, Snapshot};
use mirrorset_fs::{FileDate, FileKind, FileRecord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One aligned line per entry, optionally colored by kind.
    #[default]
    Human,
    /// NDJSON (newline-delimited JSON) for machine consumption.
    Json,
}

/// Color handling strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorChoice {
    /// Color only when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Default)]
pub struct PrinterConfig {
    pub format: OutputFormat,
    pub color: ColorChoice,
    /// Suppress the per-set summary on stderr.
    pub quiet: bool,
}

/// Static context about one printed set.
#[derive(Debug)]
pub struct SetContext<'a> {
    /// What the set means: "ls", "upload", "delete", "same".
    pub label: &'a str,
    pub total: usize,
    pub counts: KindCounts,
}

/// One entry handed to a printer.
#[derive(Debug)]
pub struct EntryRow<'a> {
    pub name: &'a str,
    pub kind: Option<FileKind>,
    pub size: Option<u64>,
    pub date: Option<FileDate>,
    pub symlink_target: Option<&'a str>,
}

impl<'a> EntryRow<'a> {
    pub fn from_record(rec: &'a FileRecord) -> Self {
        EntryRow {
            name: rec.name().unwrap_or_default(),
            kind: rec.kind(),
            size: rec.size(),
            date: rec.date(),
            symlink_target: rec.symlink_target(),
        }
    }
}

pub trait EntryPrinter {
    /// Called once before the rows of a set.
    fn begin(&mut self, ctx: &SetContext) -> io::Result<()>;

    fn print_row(&mut self, row: &EntryRow<'_>, ctx: &SetContext) -> io::Result<()>;

    /// Called once after the rows of a set; summaries go here.
    fn finish(&mut self, ctx: &SetContext) -> io::Result<()>;
}

/// Walk `set` in its active order through `printer`.
pub fn print_set(printer: &mut dyn EntryPrinter, label: &str, set: &Snapshot) -> io::Result<()> {
    let ctx = SetContext {
        label,
        total: set.len(),
        counts: set.count_by_kind(),
    };

    printer.begin(&ctx)?;
    for rec in set.iter() {
        printer.print_row(&EntryRow::from_record(rec), &ctx)?;
    }
    printer.finish(&ctx)
}

/// Human-readable printer with optional color support.
pub struct HumanPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    cfg: PrinterConfig,
    use_color: bool,
}

impl<W: Write, E: Write> HumanPrinter<W, E> {
    /// `Auto` cannot inspect a generic writer and resolves to no color.
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        let use_color = cfg.color == ColorChoice::Always;
        Self {
            out,
            err,
            cfg,
            use_color,
        }
    }

    pub fn stdout(cfg: PrinterConfig) -> HumanPrinter<io::Stdout, io::Stderr> {
        use std::io::IsTerminal;

        let use_color = match cfg.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stdout().is_terminal(),
        };

        HumanPrinter {
            out: io::stdout(),
            err: io::stderr(),
            cfg,
            use_color,
        }
    }

    fn format_name(&self, name: &str, kind: Option<FileKind>) -> String {
        let code = match kind {
            Some(FileKind::Directory) => "1;34",
            Some(FileKind::Symlink) => "36",
            _ => return name.to_owned(),
        };

        if self.use_color {
            format!("\x1b[{code}m{name}\x1b[0m")
        } else {
            name.to_owned()
        }
    }
}

fn format_size(size: Option<u64>) -> String {
    size.map(|s| s.to_string()).unwrap_or_else(|| "-".to_owned())
}

/// Local time; coarse dates are marked with `~` and shown to the minute.
fn format_date(date: Option<FileDate>) -> String {
    let Some(date) = date else {
        return "-".to_owned();
    };
    let Some(utc) = DateTime::from_timestamp(date.secs(), 0) else {
        return date.secs().to_string();
    };

    let local = utc.with_timezone(&Local);
    match date {
        FileDate::Exact(_) => local.format("%Y-%m-%d %H:%M:%S").to_string(),
        FileDate::Coarse(_) => local.format("~%Y-%m-%d %H:%M").to_string(),
    }
}

fn kind_tag(kind: Option<FileKind>) -> &'static str {
    kind.map(FileKind::tag).unwrap_or("??")
}

impl<W: Write, E: Write> EntryPrinter for HumanPrinter<W, E> {
    fn begin(&mut self, _ctx: &SetContext) -> io::Result<()> {
        Ok(())
    }

    fn print_row(&mut self, row: &EntryRow<'_>, ctx: &SetContext) -> io::Result<()> {
        let name = self.format_name(row.name, row.kind);
        write!(
            self.out,
            "{:<7} {} {:>12}  {:<19}  {}",
            ctx.label,
            kind_tag(row.kind),
            format_size(row.size),
            format_date(row.date),
            name
        )?;
        if let Some(target) = row.symlink_target {
            write!(self.out, " -> {target}")?;
        }
        writeln!(self.out)
    }

    fn finish(&mut self, ctx: &SetContext) -> io::Result<()> {
        if self.cfg.quiet {
            return Ok(());
        }

        let c = ctx.counts;
        writeln!(
            self.err,
            "[{}] {} entries: {} dirs, {} files, {} symlinks, {} unknown",
            ctx.label, ctx.total, c.dirs, c.files, c.symlinks, c.unknown
        )
    }
}

pub struct JsonPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    cfg: PrinterConfig,
}

impl<W: Write, E: Write> JsonPrinter<W, E> {
    pub fn new(out: W, err: E, cfg: PrinterConfig) -> Self {
        Self { out, err, cfg }
    }

    pub fn stdout(cfg: PrinterConfig) -> JsonPrinter<io::Stdout, io::Stderr> {
        JsonPrinter {
            out: io::stdout(),
            err: io::stderr(),
            cfg,
        }
    }
}

impl<W: Write, E: Write> EntryPrinter for JsonPrinter<W, E> {
    fn begin(&mut self, _ctx: &SetContext) -> io::Result<()> {
        Ok(())
    }

    fn print_row(&mut self, row: &EntryRow<'_>, ctx: &SetContext) -> io::Result<()> {
        let obj = serde_json::json!({
            "set": ctx.label,
            "name": row.name,
            "kind": row.kind.map(FileKind::tag),
            "size": row.size,
            "date": row.date.map(FileDate::secs),
            "date_exact": row.date.map(FileDate::is_exact),
            "symlink": row.symlink_target,
        });
        writeln!(self.out, "{}", obj)
    }

    fn finish(&mut self, ctx: &SetContext) -> io::Result<()> {
        if self.cfg.quiet {
            return Ok(());
        }

        let c = ctx.counts;
        let obj = serde_json::json!({
            "type": "summary",
            "set": ctx.label,
            "total": ctx.total,
            "dirs": c.dirs,
            "files": c.files,
            "symlinks": c.symlinks,
            "unknown": c.unknown,
        });
        writeln!(self.err, "{}", obj)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
