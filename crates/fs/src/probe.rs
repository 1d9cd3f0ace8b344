use std::{
    fs::{self, FileType, Metadata, read_dir},
    io::Result,
    path::Path,
};

use filetime::FileTime;
use log::{debug, warn};

use crate::record::{FileKind, FileRecord};

impl FileRecord {
    /// Fill kind, mode, date, size and link target from the entry at `path`.
    ///
    /// A vanished or unreadable entry leaves the record as it was, and so do
    /// sockets, fifos and devices. With `follow_symlinks` a link is resolved
    /// once; a dangling link is reported as a symlink.
    pub fn probe_local(&mut self, path: &Path, follow_symlinks: bool) {
        let mut meta = match fs::symlink_metadata(path) {
            Ok(m) => m,
            Err(e) => {
                debug!("[probe] lstat({:?}) failed: {e}", path);
                return;
            }
        };

        if follow_symlinks && meta.file_type().is_symlink() {
            match fs::metadata(path) {
                Ok(target) => meta = target,
                Err(e) => debug!("[probe] dangling symlink {:?}: {e}", path),
            }
        }

        let Some(kind) = classify(meta.file_type()) else {
            debug!("[probe] {:?} is not a file, directory or symlink", path);
            return;
        };

        self.set_size(meta.len());
        self.set_date(mtime_secs(&meta));
        if let Some(mode) = permission_bits(&meta) {
            self.set_mode(mode);
        }
        self.set_kind(kind);

        if kind == FileKind::Symlink {
            match fs::read_link(path) {
                Ok(target) => self.set_symlink(&target.to_string_lossy()),
                Err(e) => debug!("[probe] readlink({:?}) failed: {e}", path),
            }
        }
    }
}

/// Probe every entry directly inside `dir`, named by file name.
///
/// Only a failure to open `dir` is an error. Entries that cannot be read or
/// whose names are not UTF-8 are skipped.
pub fn scan_dir(dir: &Path, follow_symlinks: bool) -> Result<Vec<FileRecord>> {
    let rd = read_dir(dir)?;
    let mut records = Vec::new();

    for entry_res in rd {
        let entry = match entry_res {
            Ok(e) => e,
            Err(e) => {
                warn!("[scan] error reading entry in {:?}: {e}", dir);
                continue;
            }
        };

        let name_os = entry.file_name();
        let Some(name) = name_os.to_str() else {
            warn!("[scan] skipping non UTF-8 name {:?} in {:?}", name_os, dir);
            continue;
        };

        let mut rec = FileRecord::new(name);
        rec.probe_local(&entry.path(), follow_symlinks);
        records.push(rec);
    }

    debug!("[scan] {:?}: {} entries", dir, records.len());
    Ok(records)
}

fn classify(file_type: FileType) -> Option<FileKind> {
    if file_type.is_dir() {
        Some(FileKind::Directory)
    } else if file_type.is_file() {
        Some(FileKind::Normal)
    } else if file_type.is_symlink() {
        Some(FileKind::Symlink)
    } else {
        None
    }
}

/// Modification time in unix seconds; negative before the epoch.
pub fn mtime_secs(meta: &Metadata) -> i64 {
    FileTime::from_last_modification_time(meta).unix_seconds()
}

/// Permission bits including setuid, setgid and sticky.
#[cfg(unix)]
pub fn permission_bits(meta: &Metadata) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;

    Some(meta.permissions().mode() & 0o7777)
}

#[cfg(not(unix))]
pub fn permission_bits(_meta: &Metadata) -> Option<u32> {
    None
}

#[cfg(test)]
#[path = "probe_tests.rs"]
mod tests;
