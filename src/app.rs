use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Config;
use crate::error::{Result, SyncError};
use crate::sync::SkillPaths;
use crate::utils::absolutize;

pub struct AppContext {
    pub config: Config,
    pub paths: SkillPaths,
    pub robot_mode: bool,
}

impl AppContext {
    pub fn from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        let config = Config::load(cli.config.as_deref())?;
        let repo_root = match cli.repo_root.as_deref() {
            Some(root) => absolutize(root)?,
            None => Self::find_repo_root()?,
        };
        let user_skills = config.user_skills_dir()?;
        debug!(
            repo_root = %repo_root.display(),
            user_skills = %user_skills.display(),
            app_root = %config.app.root.display(),
            "resolved paths"
        );

        Ok(Self {
            paths: SkillPaths::new(repo_root, user_skills),
            config,
            robot_mode: cli.robot,
        })
    }

    /// The checkout this binary was built from, never the caller's working
    /// directory.
    fn find_repo_root() -> Result<PathBuf> {
        let exe = std::env::current_exe()?;
        let exe = exe.canonicalize().unwrap_or(exe);
        resolve_repo_root(Path::new(env!("CARGO_MANIFEST_DIR")), exe.parent()).ok_or_else(|| {
            SyncError::MissingConfig(
                "repository checkout not found; pass --repo-root or set SKILL_SYNC_REPO_ROOT"
                    .to_string(),
            )
        })
    }
}

/// The build checkout when it still has `skills/`, else the nearest ancestor
/// of `exe_dir` that is a skill-sync checkout.
fn resolve_repo_root(manifest_dir: &Path, exe_dir: Option<&Path>) -> Option<PathBuf> {
    if manifest_dir.join("skills").is_dir() {
        return Some(manifest_dir.to_path_buf());
    }
    let mut current = exe_dir;
    while let Some(dir) = current {
        if is_checkout(dir) {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

/// A directory holding `skills/` and this crate's own `Cargo.toml`.
fn is_checkout(dir: &Path) -> bool {
    if !dir.join("skills").is_dir() {
        return false;
    }
    let Ok(raw) = std::fs::read_to_string(dir.join("Cargo.toml")) else {
        return false;
    };
    raw.parse::<toml::Table>().is_ok_and(|manifest| {
        manifest
            .get("package")
            .and_then(|package| package.get("name"))
            .and_then(toml::Value::as_str)
            == Some(env!("CARGO_PKG_NAME"))
    })
}
