//! Apply stored metadata back onto local files after a sync decision.
//!
//! Best effort: a failing filesystem call is logged and skipped, and the
//! snapshot itself is never modified.

use std::{fs, io, path::Path};

use filetime::FileTime;
use log::debug;
use mirrorset_fs::{FileKind, mtime_secs, permission_bits};

use crate::snapshot::{Snapshot, key};

impl Snapshot {
    /// Set access and modification times of `dir/name` to each entry's
    /// stored date. Entries of unknown kind and symlinks are skipped, and
    /// with `only_dirs` so is everything but directories. Returns how many
    /// files were touched.
    pub fn apply_times(&self, dir: &Path, only_dirs: bool) -> usize {
        let mut changed = 0;

        for rec in self.iter() {
            let (Some(date), Some(kind)) = (rec.date(), rec.kind()) else {
                continue;
            };
            if kind == FileKind::Symlink || (only_dirs && kind != FileKind::Directory) {
                continue;
            }

            let path = dir.join(key(rec));
            let meta = match fs::metadata(&path) {
                Ok(m) => m,
                Err(e) => {
                    debug!("[apply_times] stat({:?}) failed: {e}", path);
                    continue;
                }
            };
            if mtime_secs(&meta) == date.secs() {
                continue;
            }

            let t = FileTime::from_unix_time(date.secs(), 0);
            match filetime::set_file_times(&path, t, t) {
                Ok(()) => changed += 1,
                Err(e) => debug!("[apply_times] utime({:?}) failed: {e}", path),
            }
        }

        changed
    }

    /// Set the permission bits of `dir/name` to each entry's stored mode
    /// with `mask` cleared. Symlinks are skipped. Returns how many files
    /// were changed.
    pub fn apply_modes(&self, dir: &Path, mask: u32) -> usize {
        let mut changed = 0;

        for rec in self.iter() {
            let Some(mode) = rec.mode() else {
                continue;
            };
            if rec.kind() == Some(FileKind::Symlink) {
                continue;
            }

            let path = dir.join(key(rec));
            let new_mode = mode & !mask;
            let meta = match fs::metadata(&path) {
                Ok(m) => m,
                Err(e) => {
                    debug!("[apply_modes] stat({:?}) failed: {e}", path);
                    continue;
                }
            };
            if permission_bits(&meta) == Some(new_mode) {
                continue;
            }

            match set_mode(&path, new_mode) {
                Ok(()) => changed += 1,
                Err(e) => debug!("[apply_modes] chmod({:?}, {:o}) failed: {e}", path, new_mode),
            }
        }

        changed
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "permission bits are not supported on this platform",
    ))
}

#[cfg(test)]
#[path = "local_tests.rs"]
mod tests;
