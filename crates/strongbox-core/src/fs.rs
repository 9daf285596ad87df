//! Filesystem utilities for atomic, owner-only writes.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Move a staged temp file over `destination`.
///
/// `fs::rename` replaces an existing destination in one step on unix and on
/// Windows, so the old file stays in place until the new one is there. On
/// failure the destination is untouched and the temp file is removed.
pub fn commit_staged(temp_path: &Path, destination: &Path) -> io::Result<()> {
    fs::rename(temp_path, destination).map_err(|err| {
        let _ = fs::remove_file(temp_path);
        io::Error::new(
            err.kind(),
            format!("Atomic rename to {} failed: {}", destination.display(), err),
        )
    })
}

/// Write `data` to a fresh hidden temp file next to `destination`.
///
/// The temp file name starts with a dot, so it is never mistaken for a
/// password entry. The caller commits it with [`commit_staged`] or
/// removes it.
pub fn stage_file(destination: &Path, data: &[u8]) -> io::Result<PathBuf> {
    let parent = destination
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no parent"))?;
    let filename = destination
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Invalid file name"))?;
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| io::Error::other(format!("System time error: {}", e)))?
        .as_nanos();
    let temp_path = parent.join(format!(
        ".{}.{}.{}.tmp",
        filename.trim_start_matches('.'),
        std::process::id(),
        nanos
    ));

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)?;
    let written = file
        .write_all(data)
        .and_then(|()| file.sync_all())
        .and_then(|()| set_owner_only(&temp_path, 0o600));
    if let Err(err) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }
    Ok(temp_path)
}

/// Replace `destination` with `data` via temp file + rename.
pub fn write_atomic(destination: &Path, data: &[u8]) -> io::Result<()> {
    let temp_path = stage_file(destination, data)?;
    commit_staged(&temp_path, destination)
}

/// Create `dir` and its parents; a newly created leaf is owner-only on unix.
pub fn ensure_private_dir(dir: &Path) -> io::Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dir)?;
    set_owner_only(dir, 0o700)
}

#[cfg(unix)]
fn set_owner_only(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(mode);
    fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
fn set_owner_only(_path: &Path, _mode: u32) -> io::Result<()> {
    Ok(())
}
