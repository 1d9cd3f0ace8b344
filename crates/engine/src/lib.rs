mod compare;
mod diff;
mod local;
mod snapshot;
mod sort;

pub use compare::{Comparator, ParsePrecisionError, Precision, same_as};
pub use snapshot::{InsertOutcome, KindCounts, Snapshot};
pub use sort::{SortOrder, cmp_name_folded};
