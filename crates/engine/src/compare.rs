use std::{error::Error, fmt, str::FromStr};

use mirrorset_fs::{FileRecord, IgnoreFlags};
use mirrorset_runtime::{DEFAULT_LOOSE_TIME_PRECISION_SECS, DEFAULT_TIME_PRECISION_SECS};

/// Largest date difference still treated as equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    Seconds(u64),
    Infinite,
}

impl Precision {
    /// Whether two dates `diff` seconds apart fall inside the window.
    #[inline]
    pub fn admits(self, diff: u64) -> bool {
        match self {
            Precision::Seconds(window) => diff <= window,
            Precision::Infinite => true,
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precision::Seconds(s) => write!(f, "{s}s"),
            Precision::Infinite => write!(f, "inf"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePrecisionError {
    input: String,
}

impl fmt::Display for ParsePrecisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid precision {:?}: expected N, Ns, Nm, Nh, Nd or inf",
            self.input
        )
    }
}

impl Error for ParsePrecisionError {}

/// Accepts `inf`/`infinity`/`never`, or a count with an optional `s`, `m`,
/// `h` or `d` suffix (seconds by default).
impl FromStr for Precision {
    type Err = ParsePrecisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePrecisionError {
            input: s.to_owned(),
        };

        let t = s.trim();
        match t.to_ascii_lowercase().as_str() {
            "inf" | "infinity" | "never" => return Ok(Precision::Infinite),
            _ => {}
        }

        let (digits, unit) = match t.char_indices().last() {
            Some((i, c)) if c.is_ascii_alphabetic() => (&t[..i], c.to_ascii_lowercase()),
            Some(_) => (t, 's'),
            None => return Err(err()),
        };

        let scale = match unit {
            's' => 1,
            'm' => 60,
            'h' => 60 * 60,
            'd' => 24 * 60 * 60,
            _ => return Err(err()),
        };

        let count: u64 = digits.parse().map_err(|_| err())?;
        count
            .checked_mul(scale)
            .map(Precision::Seconds)
            .ok_or_else(err)
    }
}

/// Tolerant equality between two records, deciding whether an entry needs
/// to be transferred again.
///
/// Checks run in a fixed order: name, kind, the directory veto, symlink
/// targets, dates, sizes. The first decisive check wins.
///
/// With `DATE_IF_OLDER` or `SIZE_IF_OLDER` the relation is not symmetric:
/// the date or size check is skipped only when the left side is older.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparator {
    pub precision: Precision,
    pub loose_precision: Precision,
    pub ignore: IgnoreFlags,
}

impl Default for Comparator {
    fn default() -> Self {
        Comparator {
            precision: Precision::Seconds(DEFAULT_TIME_PRECISION_SECS),
            loose_precision: Precision::Seconds(DEFAULT_LOOSE_TIME_PRECISION_SECS),
            ignore: IgnoreFlags::empty(),
        }
    }
}

impl Comparator {
    pub fn new(precision: Precision, loose_precision: Precision, ignore: IgnoreFlags) -> Self {
        Comparator {
            precision,
            loose_precision,
            ignore,
        }
    }

    pub fn same(&self, a: &FileRecord, b: &FileRecord) -> bool {
        if let (Some(x), Some(y)) = (a.name(), b.name())
            && x != y
        {
            return false;
        }
        if let (Some(x), Some(y)) = (a.kind(), b.kind())
            && x != y
        {
            return false;
        }

        // Directory contents are not compared, so a directory always
        // needs attention.
        if a.is_dir() || b.is_dir() {
            return false;
        }

        if let (Some(x), Some(y)) = (a.symlink_target(), b.symlink_target()) {
            return x == y;
        }

        let dates = a.date().zip(b.date());
        let left_older = dates.is_some_and(|(da, db)| da.secs() < db.secs());

        if let Some((da, db)) = dates
            && !self.ignore.contains(IgnoreFlags::DATE)
        {
            let window = if da.is_exact() && db.is_exact() {
                self.precision
            } else {
                self.loose_precision
            };
            let skip = self.ignore.contains(IgnoreFlags::DATE_IF_OLDER) && left_older;
            if !skip && !window.admits(da.secs().abs_diff(db.secs())) {
                return false;
            }
        }

        if let (Some(sa), Some(sb)) = (a.size(), b.size())
            && !self.ignore.contains(IgnoreFlags::SIZE)
        {
            let skip = self.ignore.contains(IgnoreFlags::SIZE_IF_OLDER) && left_older;
            if !skip && sa != sb {
                return false;
            }
        }

        true
    }
}

/// `Comparator::same` with the tolerances spelled out.
pub fn same_as(
    a: &FileRecord,
    b: &FileRecord,
    precision: Precision,
    loose_precision: Precision,
    ignore: IgnoreFlags,
) -> bool {
    Comparator::new(precision, loose_precision, ignore).same(a, b)
}

#[cfg(test)]
#[path = "compare_tests.rs"]
mod tests;
