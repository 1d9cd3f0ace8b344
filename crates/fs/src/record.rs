use std::any::Any;
use std::fmt;
use std::path::Path;

use crate::flags::Fields;

/// Kind of a filesystem entry. Anything else (sockets, fifos, devices) is
/// not representable and leaves the kind unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Normal,
    Directory,
    Symlink,
}

impl FileKind {
    /// Short tag used by printers, in the spirit of `LS_COLORS` keys.
    pub fn tag(self) -> &'static str {
        match self {
            FileKind::Normal => "fi",
            FileKind::Directory => "di",
            FileKind::Symlink => "ln",
        }
    }
}

/// Last-modified date in unix seconds.
///
/// Listings that only print minutes or days produce a `Coarse` date; a
/// local stat or a precise listing produces an `Exact` one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileDate {
    Exact(i64),
    Coarse(i64),
}

impl FileDate {
    #[inline]
    pub fn secs(self) -> i64 {
        match self {
            FileDate::Exact(s) | FileDate::Coarse(s) => s,
        }
    }

    #[inline]
    pub fn is_exact(self) -> bool {
        matches!(self, FileDate::Exact(_))
    }
}

/// One entry of a snapshot with partially known attributes.
///
/// Every attribute is an `Option`: `None` means "never observed", which is
/// distinct from an observed zero or empty value.
#[derive(Default)]
pub struct FileRecord {
    name: Option<String>,
    kind: Option<FileKind>,
    mode: Option<u32>,
    date: Option<FileDate>,
    size: Option<u64>,
    symlink_target: Option<String>,
    /// Caller bookkeeping; never interpreted and not carried over by `clone`.
    pub user_data: Option<Box<dyn Any + Send>>,
}

impl FileRecord {
    pub fn new(name: impl Into<String>) -> Self {
        FileRecord {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Build a record named after `path` and probe the real entry behind it.
    pub fn local(path: &Path, follow_symlinks: bool) -> Self {
        let mut rec = FileRecord::new(path.to_string_lossy());
        rec.probe_local(path, follow_symlinks);
        rec
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn kind(&self) -> Option<FileKind> {
        self.kind
    }

    #[inline]
    pub fn mode(&self) -> Option<u32> {
        self.mode
    }

    #[inline]
    pub fn date(&self) -> Option<FileDate> {
        self.date
    }

    #[inline]
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    #[inline]
    pub fn symlink_target(&self) -> Option<&str> {
        self.symlink_target.as_deref()
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind == Some(FileKind::Directory)
    }

    /// Which attributes currently hold observed values.
    pub fn defined(&self) -> Fields {
        let mut f = Fields::empty();
        f.set(Fields::NAME, self.name.is_some());
        f.set(Fields::KIND, self.kind.is_some());
        f.set(Fields::MODE, self.mode.is_some());
        f.set(Fields::SIZE, self.size.is_some());
        f.set(Fields::SYMLINK, self.symlink_target.is_some());
        match self.date {
            Some(FileDate::Exact(_)) => f.insert(Fields::DATE),
            Some(FileDate::Coarse(_)) => f.insert(Fields::DATE_COARSE),
            None => {}
        }
        f
    }

    pub fn set_name(&mut self, name: &str) {
        if self.name.as_deref() == Some(name) {
            return;
        }
        self.name = Some(name.to_owned());
    }

    /// Set the kind. A non-symlink kind drops any stored link target.
    pub fn set_kind(&mut self, kind: FileKind) {
        if kind != FileKind::Symlink {
            self.symlink_target = None;
        }
        self.kind = Some(kind);
    }

    pub fn set_mode(&mut self, mode: u32) {
        self.mode = Some(mode);
    }

    pub fn set_date(&mut self, secs: i64) {
        self.date = Some(FileDate::Exact(secs));
    }

    pub fn set_date_coarse(&mut self, secs: i64) {
        self.date = Some(FileDate::Coarse(secs));
    }

    pub fn set_size(&mut self, size: u64) {
        self.size = Some(size);
    }

    /// Set the link target; this also marks the record as a symlink.
    pub fn set_symlink(&mut self, target: &str) {
        self.kind = Some(FileKind::Symlink);
        self.symlink_target = Some(target.to_owned());
    }

    /// True when a date is known and lies strictly before `t`.
    #[inline]
    pub fn older_than(&self, t: i64) -> bool {
        self.date.is_some_and(|d| d.secs() < t)
    }

    /// Fill in attributes this record lacks from `other`.
    ///
    /// Attributes already known here are never overwritten. An exact date
    /// from `other` replaces a coarse one, a coarse date is only taken when
    /// no date is known. Records with different names are left untouched.
    pub fn merge(&mut self, other: &FileRecord) {
        if self.name != other.name {
            return;
        }

        if self.kind.is_none()
            && let Some(k) = other.kind
        {
            self.kind = Some(k);
        }
        if self.mode.is_none() {
            self.mode = other.mode;
        }
        if self.size.is_none() {
            self.size = other.size;
        }

        match (self.date, other.date) {
            (None, Some(d)) => self.date = Some(d),
            (Some(FileDate::Coarse(_)), Some(d @ FileDate::Exact(_))) => self.date = Some(d),
            _ => {}
        }

        if self.symlink_target.is_none()
            && self.kind == Some(FileKind::Symlink)
            && let Some(target) = &other.symlink_target
        {
            self.symlink_target = Some(target.clone());
        }
    }
}

impl Clone for FileRecord {
    fn clone(&self) -> Self {
        FileRecord {
            name: self.name.clone(),
            kind: self.kind,
            mode: self.mode,
            date: self.date,
            size: self.size,
            symlink_target: self.symlink_target.clone(),
            user_data: None,
        }
    }
}

impl fmt::Debug for FileRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileRecord")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("mode", &self.mode.map(|m| format!("{m:o}")))
            .field("date", &self.date)
            .field("size", &self.size)
            .field("symlink_target", &self.symlink_target)
            .field("user_data", &self.user_data.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
