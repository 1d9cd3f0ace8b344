//! Set subtraction between two snapshots: the decision logic of a mirror.
//!
//! Every operation removes entries from `self` in place, consulting a
//! second snapshot or a predicate, and returns how many entries it removed.

use log::debug;
use mirrorset_fs::{FileKind, PathMatcher, join_path};

use crate::compare::Comparator;
use crate::snapshot::{Snapshot, key};

impl Snapshot {
    /// Remove entries that have a same-named entry in `other` which `cmp`
    /// considers the same. What survives needs a transfer.
    pub fn subtract_same(&mut self, other: &Snapshot, cmp: &Comparator) -> usize {
        let before = self.len();
        let removed = self.retain_records(|rec| {
            !other
                .find_by_name(key(rec))
                .is_some_and(|theirs| cmp.same(rec, theirs))
        });
        debug!("[subtract_same] removed {removed} of {before}");
        removed
    }

    /// Remove entries whose name exists in `other` at all.
    pub fn subtract_any(&mut self, other: &Snapshot) -> usize {
        let before = self.len();
        let removed = self.retain_records(|rec| !other.contains(key(rec)));
        debug!("[subtract_any] removed {removed} of {before}");
        removed
    }

    /// Remove entries whose name does not exist in `other`, leaving the
    /// intersection by name.
    pub fn subtract_not_in(&mut self, other: &Snapshot) -> usize {
        let before = self.len();
        let removed = self.retain_records(|rec| other.contains(key(rec)));
        debug!("[subtract_not_in] removed {removed} of {before}");
        removed
    }

    /// Remove regular files (and entries of unknown kind) dated strictly
    /// before `t`. Directories and symlinks are kept.
    pub fn subtract_older_than(&mut self, t: i64) -> usize {
        let before = self.len();
        let removed = self.retain_records(|rec| {
            let ages = matches!(rec.kind(), None | Some(FileKind::Normal));
            !(ages && rec.older_than(t))
        });
        debug!("[subtract_older_than] t={t} removed {removed} of {before}");
        removed
    }

    /// Filter by the path `prefix/name`.
    ///
    /// An entry is removed when `include` does not select it and either
    /// `exclude` selects it, or only `include` was given. An include
    /// pattern alone is therefore a strict allow-list, an exclude pattern
    /// alone a deny-list, and with both an include match rescues an
    /// excluded entry.
    pub fn filter_by_path(
        &mut self,
        prefix: &str,
        exclude: Option<&dyn PathMatcher>,
        include: Option<&dyn PathMatcher>,
    ) -> usize {
        if exclude.is_none() && include.is_none() {
            return 0;
        }

        let before = self.len();
        let removed = self.retain_records(|rec| {
            let path = join_path(prefix, key(rec));
            let included = include.is_some_and(|m| m.is_match(&path));
            let excluded = exclude.is_some_and(|m| m.is_match(&path));
            let allow_list_only = include.is_some() && exclude.is_none();
            included || !(excluded || allow_list_only)
        });
        debug!("[filter_by_path] prefix={prefix:?} removed {removed} of {before}");
        removed
    }

    /// Remove the `.` and `..` pseudo entries some listings report.
    pub fn exclude_dots(&mut self) -> usize {
        self.retain_records(|rec| !matches!(key(rec), "." | ".."))
    }
}

#[cfg(test)]
#[path = "diff_tests.rs"]
mod tests;
