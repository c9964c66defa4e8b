//! Skill collection synchronization.
//!
//! Every direction is the same [`mirror`] primitive run over a different
//! pair of collections:
//!
//! - push: repository `skills/` → user-level collection
//! - pull: user-level collection → repository `skills/`
//! - sync-from-app: analyzer app's bundled skill → repository `skills/`

pub mod app;
pub mod mirror;

use std::path::{Path, PathBuf};

use crate::error::{Result, SyncError};
use crate::utils::ensure_dir;

pub use app::{AppSyncReport, sync_from_app};
pub use mirror::{MirrorOptions, MirrorReport, mirror, mirror_keeping};

/// Resolved locations of the two local skill collections.
#[derive(Debug, Clone)]
pub struct SkillPaths {
    pub repo_root: PathBuf,
    pub repo_skills: PathBuf,
    pub user_skills: PathBuf,
}

impl SkillPaths {
    #[must_use]
    pub fn new(repo_root: PathBuf, user_skills: PathBuf) -> Self {
        Self {
            repo_skills: repo_root.join("skills"),
            repo_root,
            user_skills,
        }
    }
}

/// Install the repository's skills into the user-level collection.
pub fn push(paths: &SkillPaths, options: MirrorOptions) -> Result<MirrorReport> {
    mirror_into(&paths.repo_skills, &paths.user_skills, options)
}

/// Bring the user-level collection back into the repository.
pub fn pull(paths: &SkillPaths, options: MirrorOptions) -> Result<MirrorReport> {
    mirror_into(&paths.user_skills, &paths.repo_skills, options)
}

/// Create the destination root (unless dry-running) once the source is known
/// to exist, then mirror.
fn mirror_into(source: &Path, destination: &Path, options: MirrorOptions) -> Result<MirrorReport> {
    if !source.is_dir() {
        return Err(SyncError::SourceMissing {
            path: source.to_path_buf(),
        });
    }
    if !options.dry_run {
        ensure_dir(destination)?;
    }
    mirror(source, destination, options)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn paths(tmp: &Path) -> SkillPaths {
        SkillPaths::new(tmp.join("repo"), tmp.join("home/.snowflake/cortex/skills"))
    }

    #[test]
    fn push_creates_user_collection() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = paths(tmp.path());
        write(&paths.repo_skills, "oltp-health-check/SKILL.md", "# health");

        push(&paths, MirrorOptions::default()).unwrap();

        assert_eq!(
            fs::read_to_string(paths.user_skills.join("oltp-health-check/SKILL.md")).unwrap(),
            "# health"
        );
    }

    #[test]
    fn pull_creates_repo_collection() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = paths(tmp.path());
        write(&paths.user_skills, "unistore-propensity/SKILL.md", "# propensity");

        pull(&paths, MirrorOptions::default()).unwrap();

        assert!(paths.repo_skills.join("unistore-propensity/SKILL.md").is_file());
    }

    #[test]
    fn push_then_pull_settles() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = paths(tmp.path());
        write(&paths.repo_skills, "a/SKILL.md", "a");
        write(&paths.user_skills, "b/SKILL.md", "b");

        push(&paths, MirrorOptions::default()).unwrap();
        let pulled = pull(&paths, MirrorOptions::default()).unwrap();
        let pushed = push(&paths, MirrorOptions::default()).unwrap();

        assert!(pulled.is_noop());
        assert!(pushed.is_noop());
        assert!(!paths.user_skills.join("b").exists());
    }

    #[test]
    fn missing_source_leaves_no_destination() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = paths(tmp.path());

        let err = push(&paths, MirrorOptions::default()).unwrap_err();

        assert!(matches!(err, SyncError::SourceMissing { .. }));
        assert!(!paths.user_skills.exists());
    }
}
