//! Filesystem utilities.
//!
//! Helper functions for file operations.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use sha2::{Digest, Sha256};

use crate::error::{Result, fs_err};

/// Ensure a directory exists, creating it if necessary.
///
/// Returns `true` when the directory had to be created.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    if path.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(path).map_err(fs_err("create directory", path))?;
    Ok(true)
}

/// SHA-256 of a file's contents, hex encoded.
pub fn file_digest(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(fs_err("open", path))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = file.read(&mut buf).map_err(fs_err("read", path))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Whether two regular files have identical contents.
pub fn same_contents(a: &Path, b: &Path) -> Result<bool> {
    let len_a = fs::metadata(a).map_err(fs_err("stat", a))?.len();
    let len_b = fs::metadata(b).map_err(fs_err("stat", b))?.len();
    if len_a != len_b {
        return Ok(false);
    }
    Ok(file_digest(a)? == file_digest(b)?)
}

/// Copy a file, carrying over its permissions and modification time.
///
/// Writes a temporary sibling and renames it over `to`.
pub fn copy_file(from: &Path, to: &Path) -> Result<()> {
    let tmp = temp_sibling(to);
    let _ = fs::remove_file(&tmp);
    let result = fs::copy(from, &tmp)
        .map_err(fs_err("copy", from))
        .and_then(|_| {
            let modified = fs::metadata(from)
                .and_then(|meta| meta.modified())
                .map_err(fs_err("stat", from))?;
            set_mtime(&tmp, modified).map_err(fs_err("set mtime", &tmp))
        })
        .and_then(|()| fs::rename(&tmp, to).map_err(fs_err("rename", to)));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.skill-sync.tmp"))
}

// futimens only needs ownership, so a read-only handle works on 0444 copies.
#[cfg(unix)]
fn set_mtime(path: &Path, time: SystemTime) -> std::io::Result<()> {
    File::open(path)?.set_modified(time)
}

#[cfg(not(unix))]
fn set_mtime(path: &Path, time: SystemTime) -> std::io::Result<()> {
    File::options().write(true).open(path)?.set_modified(time)
}

/// Remove a file, symlink, or directory tree without following links.
pub fn remove_entry(path: &Path) -> Result<()> {
    let meta = fs::symlink_metadata(path).map_err(fs_err("stat", path))?;
    if meta.is_dir() {
        fs::remove_dir_all(path).map_err(fs_err("remove directory", path))
    } else {
        fs::remove_file(path).map_err(fs_err("remove", path))
    }
}

/// Absolute form of `path`, resolving symlinks when the path exists.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    if let Ok(canonical) = path.canonicalize() {
        return Ok(canonical);
    }
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(path))
}
