use std::cmp::Ordering;

use log::debug;

use crate::snapshot::{Snapshot, key};

/// Iteration orders a snapshot can be viewed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending by name; the canonical order unless case folding.
    #[default]
    ByName,
    /// Descending by size; entries with unknown size go last.
    BySize,
    /// Directories before everything else.
    DirsFirst,
}

/// ASCII case-insensitive name comparison.
pub fn cmp_name_folded(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
}

impl Snapshot {
    /// Order iteration by `order` without touching canonical storage.
    ///
    /// `ByName` without case folding is the canonical order and simply
    /// drops any view. Otherwise a view is built, or the active one is
    /// reordered, and insertions are refused until `unsort`.
    pub fn sort(&mut self, order: SortOrder, case_fold: bool) {
        if order == SortOrder::ByName && !case_fold {
            self.unsort();
            return;
        }

        let records = &self.records;
        let view = self
            .view
            .get_or_insert_with(|| (0..records.len()).collect());

        match order {
            SortOrder::ByName => {
                view.sort_by(|&a, &b| cmp_name_folded(key(&records[a]), key(&records[b])))
            }
            SortOrder::BySize => view.sort_by(|&a, &b| records[b].size().cmp(&records[a].size())),
            SortOrder::DirsFirst => view.sort_by_key(|&i| !records[i].is_dir()),
        }

        debug!(
            "[sort] {:?} (case_fold={}) over {} entries",
            order,
            case_fold,
            view.len()
        );
    }

    /// Drop the sort view, returning to canonical name order.
    pub fn unsort(&mut self) {
        self.view = None;
    }
}

#[cfg(test)]
#[path = "sort_tests.rs"]
mod tests;
