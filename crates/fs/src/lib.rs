mod flags;
mod helpers;
mod matcher;
mod probe;
mod record;

pub use flags::{Fields, IgnoreFlags};
pub use helpers::join_path;
pub use matcher::{FnMatcher, GlobMatcher, PathMatcher};
pub use probe::{mtime_secs, permission_bits, scan_dir};
pub use record::{FileDate, FileKind, FileRecord};
