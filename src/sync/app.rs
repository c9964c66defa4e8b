//! Pull the bundled skill and its support files out of the analyzer app.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::{Result, SyncError};
use crate::utils::{copy_file, ensure_dir};

use super::mirror::{MirrorOptions, MirrorReport, mirror_keeping};

#[derive(Debug, Clone, Serialize)]
pub struct AppSyncReport {
    #[serde(flatten)]
    pub mirror: MirrorReport,
    pub support_dir: PathBuf,
    pub support_files_copied: Vec<String>,
    pub support_files_missing: Vec<String>,
}

/// Mirror `<app>/<skills_subdir>/<skill>` into `<repo_skills>/<skill>`, then
/// copy whichever support files exist at the app root into the skill's
/// support directory.
///
/// Nothing under `repo_skills` is touched when the app source is missing.
pub fn sync_from_app(
    app: &AppConfig,
    repo_skills: &Path,
    options: MirrorOptions,
) -> Result<AppSyncReport> {
    let skills_dir = app.skills_dir();
    if !skills_dir.is_dir() {
        return Err(SyncError::SourceMissing { path: skills_dir });
    }
    let skill_src = app.skill_dir();
    if !skill_src.is_dir() {
        return Err(SyncError::SourceMissing { path: skill_src });
    }

    let present: Vec<&String> = app
        .support_files
        .iter()
        .filter(|name| app.root.join(name.as_str()).is_file())
        .collect();

    // The support dir and the files about to be recopied into it are not
    // pruned, so a run without changes stays a no-op.
    let support_rel = PathBuf::from(&app.support_dir);
    let mut keep = vec![support_rel.clone()];
    keep.extend(present.iter().map(|name| support_rel.join(name.as_str())));

    let skill_dst = repo_skills.join(&app.skill);
    if !options.dry_run {
        ensure_dir(&skill_dst)?;
    }
    let mirror_report = mirror_keeping(&skill_src, &skill_dst, options, &keep)?;

    let support_dir = skill_dst.join(&app.support_dir);
    if !options.dry_run {
        ensure_dir(&support_dir)?;
    }

    let mut copied = Vec::new();
    let mut missing = Vec::new();
    for name in &app.support_files {
        if !present.contains(&name) {
            debug!(file = %app.root.join(name).display(), "support file not present");
            missing.push(name.clone());
            continue;
        }
        if !options.dry_run {
            copy_file(&app.root.join(name), &support_dir.join(name))?;
        }
        copied.push(name.clone());
    }

    info!(
        skill = %app.skill,
        copied = copied.len(),
        missing = missing.len(),
        "support files synced"
    );

    Ok(AppSyncReport {
        mirror: mirror_report,
        support_dir,
        support_files_copied: copied,
        support_files_missing: missing,
    })
}
