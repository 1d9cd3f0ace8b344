use log::trace;
use mirrorset_fs::{FileKind, FileRecord};

/// Owned set of records, unique by name, describing one side of a mirror.
///
/// Storage is always sorted by name. An optional sort view holds a
/// permutation of storage indices; while it is active every positional
/// accessor (`at`, `iter`, `curr`, `next`, `remove`) follows the view.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub(crate) records: Vec<FileRecord>,
    pub(crate) view: Option<Vec<usize>>,
    cursor: usize,
}

/// Result of handing a record to `Snapshot::insert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Stored as a new entry at this canonical position.
    Added(usize),
    /// Merged into the existing entry at this canonical position.
    Merged(usize),
    /// Dropped because it has no name.
    Rejected,
}

/// Entry counts per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindCounts {
    pub dirs: usize,
    pub files: usize,
    pub symlinks: usize,
    pub unknown: usize,
}

impl KindCounts {
    #[inline]
    pub fn total(&self) -> usize {
        self.dirs + self.files + self.symlinks + self.unknown
    }
}

/// Records in a snapshot always carry a name; `insert` enforces it.
#[inline]
pub(crate) fn key(rec: &FileRecord) -> &str {
    rec.name().unwrap_or_default()
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn is_sorted_view(&self) -> bool {
        self.view.is_some()
    }

    /// Index of the first canonical entry whose name is `>= name`.
    #[inline]
    fn position_ge(&self, name: &str) -> usize {
        self.records.partition_point(|r| key(r) < name)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&FileRecord> {
        let pos = self.position_ge(name);
        self.records.get(pos).filter(|r| key(r) == name)
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut FileRecord> {
        let pos = self.position_ge(name);
        self.records.get_mut(pos).filter(|r| key(r) == name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.find_by_name(name).is_some()
    }

    /// Add a record at its sorted position, or merge it into the entry
    /// that already has its name. Nameless records are dropped.
    ///
    /// # Panics
    /// If a sort view is active; call `unsort` first.
    pub fn insert(&mut self, record: FileRecord) -> InsertOutcome {
        assert!(
            self.view.is_none(),
            "insert into a snapshot with an active sort view"
        );

        let Some(name) = record.name() else {
            trace!("[insert] dropping record without a name");
            return InsertOutcome::Rejected;
        };

        let pos = self.position_ge(name);
        match self.records.get_mut(pos) {
            Some(existing) if key(existing) == name => {
                existing.merge(&record);
                InsertOutcome::Merged(pos)
            }
            _ => {
                self.records.insert(pos, record);
                InsertOutcome::Added(pos)
            }
        }
    }

    /// Remove and return the entry at `index` in the active order.
    ///
    /// # Panics
    /// If `index` is out of range.
    pub fn remove(&mut self, index: usize) -> FileRecord {
        assert!(
            index < self.len(),
            "remove index {index} out of range for snapshot of {}",
            self.len()
        );

        let slot = match &mut self.view {
            Some(view) => {
                let slot = view.remove(index);
                for i in view.iter_mut() {
                    if *i > slot {
                        *i -= 1;
                    }
                }
                slot
            }
            None => index,
        };

        if self.cursor > index {
            self.cursor -= 1;
        }

        self.records.remove(slot)
    }

    /// Keep only records for which `keep` returns true, preserving both
    /// orders and the cursor's logical position. Returns how many were
    /// removed.
    pub(crate) fn retain_records<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&FileRecord) -> bool,
    {
        let keep_mask: Vec<bool> = self.records.iter().map(&mut keep).collect();
        let removed = keep_mask.iter().filter(|k| !**k).count();
        if removed == 0 {
            return 0;
        }

        let before_cursor = (0..self.cursor.min(self.len()))
            .filter(|&pos| !keep_mask[self.slot(pos)])
            .count();
        self.cursor -= before_cursor;

        if let Some(view) = &mut self.view {
            let mut remap = vec![0usize; keep_mask.len()];
            let mut next = 0;
            for (slot, kept) in keep_mask.iter().enumerate() {
                if *kept {
                    remap[slot] = next;
                    next += 1;
                }
            }
            view.retain(|&slot| keep_mask[slot]);
            for slot in view.iter_mut() {
                *slot = remap[*slot];
            }
        }

        let mut idx = 0;
        self.records.retain(|_| {
            let kept = keep_mask[idx];
            idx += 1;
            kept
        });

        removed
    }

    /// Merge every record of `other` into this snapshot: same-named entries
    /// are filled in, the rest are inserted as copies.
    ///
    /// # Panics
    /// If a sort view is active and a copy has to be inserted.
    pub fn merge_from(&mut self, other: &Snapshot) {
        for rec in &other.records {
            match self.find_by_name_mut(key(rec)) {
                Some(existing) => existing.merge(rec),
                None => {
                    self.insert(rec.clone());
                }
            }
        }
    }

    /// Add a bare, name-only record for every name not present yet.
    pub fn merge_names<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref();
            if !self.contains(name) {
                self.insert(FileRecord::new(name));
            }
        }
    }

    pub fn count_by_kind(&self) -> KindCounts {
        let mut counts = KindCounts::default();
        for rec in &self.records {
            match rec.kind() {
                Some(FileKind::Directory) => counts.dirs += 1,
                Some(FileKind::Normal) => counts.files += 1,
                Some(FileKind::Symlink) => counts.symlinks += 1,
                None => counts.unknown += 1,
            }
        }
        counts
    }

    /// Drop every record, the sort view and the cursor position.
    pub fn clear(&mut self) {
        self.records.clear();
        self.view = None;
        self.cursor = 0;
    }

    /// Storage slot of the entry at `pos` in the active order.
    #[inline]
    fn slot(&self, pos: usize) -> usize {
        match &self.view {
            Some(view) => view[pos],
            None => pos,
        }
    }

    /// The `i`-th entry in the active order.
    pub fn at(&self, i: usize) -> Option<&FileRecord> {
        if i >= self.len() {
            return None;
        }
        Some(&self.records[self.slot(i)])
    }

    /// Entries in the active order.
    pub fn iter(&self) -> impl Iterator<Item = &FileRecord> + '_ {
        (0..self.len()).map(move |pos| &self.records[self.slot(pos)])
    }

    /// Entries in canonical name order regardless of any sort view.
    pub fn iter_by_name(&self) -> impl Iterator<Item = &FileRecord> + '_ {
        self.records.iter()
    }

    pub fn curr(&self) -> Option<&FileRecord> {
        self.at(self.cursor)
    }

    /// Advance the cursor and return the entry it lands on.
    pub fn next(&mut self) -> Option<&FileRecord> {
        if self.cursor < self.len() {
            self.cursor += 1;
            return self.curr();
        }
        None
    }

    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

/// Deep copy of every record; the sort view is not carried over.
impl Clone for Snapshot {
    fn clone(&self) -> Self {
        Snapshot {
            records: self.records.clone(),
            view: None,
            cursor: self.cursor,
        }
    }
}

impl FromIterator<FileRecord> for Snapshot {
    fn from_iter<T: IntoIterator<Item = FileRecord>>(iter: T) -> Self {
        let mut set = Snapshot::new();
        set.extend(iter);
        set
    }
}

impl Extend<FileRecord> for Snapshot {
    fn extend<T: IntoIterator<Item = FileRecord>>(&mut self, iter: T) {
        for rec in iter {
            self.insert(rec);
        }
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
