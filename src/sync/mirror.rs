//! Exact directory mirroring with pruning.
//!
//! After [`mirror`] the destination holds exactly the source's entries:
//! changed files are overwritten, identical files are left alone, and
//! anything only present in the destination is deleted.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{Result, SyncError, fs_err};
use crate::utils::{absolutize, copy_file, ensure_dir, remove_entry, same_contents};

#[derive(Debug, Clone, Copy, Default)]
pub struct MirrorOptions {
    /// Compute the report without touching the destination.
    pub dry_run: bool,
}

/// Outcome of a single mirror. Paths are relative to the mirrored roots.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct MirrorReport {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub created_dirs: Vec<PathBuf>,
    pub copied: Vec<PathBuf>,
    pub unchanged: usize,
    pub removed: Vec<PathBuf>,
    pub dry_run: bool,
}

impl MirrorReport {
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.created_dirs.is_empty() && self.copied.is_empty() && self.removed.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Dir,
    File,
    Symlink,
}

impl EntryKind {
    fn of(file_type: fs::FileType) -> Self {
        if file_type.is_symlink() {
            Self::Symlink
        } else if file_type.is_dir() {
            Self::Dir
        } else {
            Self::File
        }
    }
}

/// Make `destination` an exact copy of `source`.
pub fn mirror(source: &Path, destination: &Path, options: MirrorOptions) -> Result<MirrorReport> {
    mirror_keeping(source, destination, options, &[])
}

/// [`mirror`], except destination entries listed in `keep` (relative paths)
/// are never pruned. Their contents are not protected.
pub fn mirror_keeping(
    source: &Path,
    destination: &Path,
    options: MirrorOptions,
    keep: &[PathBuf],
) -> Result<MirrorReport> {
    if !source.is_dir() {
        return Err(SyncError::SourceMissing {
            path: source.to_path_buf(),
        });
    }
    check_overlap(source, destination)?;

    let mut report = MirrorReport {
        source: source.to_path_buf(),
        destination: destination.to_path_buf(),
        dry_run: options.dry_run,
        ..MirrorReport::default()
    };

    let source_entries = scan(source)?;

    if destination.is_dir() {
        prune(destination, &source_entries, keep, &mut report, options)?;
    } else if !options.dry_run {
        ensure_dir(destination)?;
    }

    for (rel, kind) in &source_entries {
        let from = source.join(rel);
        let to = destination.join(rel);
        match kind {
            EntryKind::Dir => sync_dir(rel, &to, &mut report, options)?,
            EntryKind::File => sync_file(rel, &from, &to, &mut report, options)?,
            EntryKind::Symlink => sync_symlink(rel, &from, &to, &mut report, options)?,
        }
    }

    info!(
        source = %source.display(),
        destination = %destination.display(),
        copied = report.copied.len(),
        removed = report.removed.len(),
        unchanged = report.unchanged,
        dry_run = options.dry_run,
        "mirror complete"
    );
    Ok(report)
}

/// Entries under `root` (excluding root) in walk order, parents first.
fn scan(root: &Path) -> Result<Vec<(PathBuf, EntryKind)>> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| SyncError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        let rel = relative(root, entry.path())?;
        entries.push((rel, EntryKind::of(entry.file_type())));
    }
    Ok(entries)
}

fn relative(root: &Path, path: &Path) -> Result<PathBuf> {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .map_err(|err| SyncError::Fs {
            action: "relativize",
            path: path.to_path_buf(),
            source: std::io::Error::other(err),
        })
}

/// Delete destination entries the source does not have.
fn prune(
    destination: &Path,
    source_entries: &[(PathBuf, EntryKind)],
    keep: &[PathBuf],
    report: &mut MirrorReport,
    options: MirrorOptions,
) -> Result<()> {
    let wanted: HashSet<&Path> = source_entries.iter().map(|(rel, _)| rel.as_path()).collect();

    let mut removed_dirs: Vec<PathBuf> = Vec::new();
    for (rel, kind) in scan(destination)? {
        if removed_dirs.iter().any(|dir| rel.starts_with(dir)) {
            continue;
        }
        // Entries replaced by a different kind are handled during the copy pass.
        if wanted.contains(rel.as_path()) || keep.contains(&rel) {
            continue;
        }

        debug!(path = %rel.display(), "prune");
        if !options.dry_run {
            remove_entry(&destination.join(&rel))?;
        }
        if kind == EntryKind::Dir {
            removed_dirs.push(rel.clone());
        }
        report.removed.push(rel);
    }
    Ok(())
}

fn sync_dir(rel: &Path, to: &Path, report: &mut MirrorReport, options: MirrorOptions) -> Result<()> {
    match fs::symlink_metadata(to) {
        Ok(meta) if meta.is_dir() => return Ok(()),
        Ok(_) => {
            debug!(path = %rel.display(), "replace non-directory");
            if !options.dry_run {
                remove_entry(to)?;
            }
            report.removed.push(rel.to_path_buf());
        }
        Err(_) => {}
    }

    debug!(path = %rel.display(), "mkdir");
    if !options.dry_run {
        fs::create_dir(to).map_err(fs_err("create directory", to))?;
    }
    report.created_dirs.push(rel.to_path_buf());
    Ok(())
}

fn sync_file(
    rel: &Path,
    from: &Path,
    to: &Path,
    report: &mut MirrorReport,
    options: MirrorOptions,
) -> Result<()> {
    match fs::symlink_metadata(to) {
        Ok(meta) if meta.is_file() => {
            if same_contents(from, to)? {
                report.unchanged += 1;
                return Ok(());
            }
        }
        Ok(_) => {
            if !options.dry_run {
                remove_entry(to)?;
            }
            report.removed.push(rel.to_path_buf());
        }
        Err(_) => {}
    }

    debug!(path = %rel.display(), "copy");
    if !options.dry_run {
        copy_file(from, to)?;
    }
    report.copied.push(rel.to_path_buf());
    Ok(())
}

fn sync_symlink(
    rel: &Path,
    from: &Path,
    to: &Path,
    report: &mut MirrorReport,
    options: MirrorOptions,
) -> Result<()> {
    let target = fs::read_link(from).map_err(fs_err("read link", from))?;
    match fs::symlink_metadata(to) {
        Ok(meta) if meta.file_type().is_symlink() => {
            if fs::read_link(to).map_err(fs_err("read link", to))? == target {
                report.unchanged += 1;
                return Ok(());
            }
            if !options.dry_run {
                remove_entry(to)?;
            }
        }
        Ok(_) => {
            if !options.dry_run {
                remove_entry(to)?;
            }
            report.removed.push(rel.to_path_buf());
        }
        Err(_) => {}
    }

    debug!(path = %rel.display(), target = %target.display(), "link");
    if !options.dry_run {
        make_symlink(&target, from, to)?;
    }
    report.copied.push(rel.to_path_buf());
    Ok(())
}

#[cfg(unix)]
fn make_symlink(target: &Path, _from: &Path, to: &Path) -> Result<()> {
    std::os::unix::fs::symlink(target, to).map_err(fs_err("create symlink", to))
}

#[cfg(not(unix))]
fn make_symlink(_target: &Path, from: &Path, to: &Path) -> Result<()> {
    // Without portable symlinks, fall back to copying what the link points at.
    copy_file(from, to)
}

fn check_overlap(source: &Path, destination: &Path) -> Result<()> {
    let from = absolutize(source)?;
    let to = absolutize(destination)?;
    if from.starts_with(&to) || to.starts_with(&from) {
        return Err(SyncError::OverlappingPaths { from, to });
    }
    Ok(())
}
