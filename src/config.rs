use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SyncError};

/// Built-in install location of the external analyzer application.
pub const DEFAULT_APP_ROOT: &str = "/opt/unistore/hybrid-table-analyzer";

/// Environment variable overriding [`DEFAULT_APP_ROOT`].
pub const APP_ROOT_ENV: &str = "CORTEX_APP_ROOT";

/// Environment variable overriding the user-level skill collection.
pub const USER_SKILLS_DIR_ENV: &str = "SKILL_SYNC_USER_SKILLS_DIR";

/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV: &str = "SKILL_SYNC_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// User-level installed skill collection. `None` resolves to
    /// `~/.snowflake/cortex/skills`.
    #[serde(default)]
    pub user_skills_dir: Option<PathBuf>,
    #[serde(default)]
    pub app: AppConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    pub root: PathBuf,
    /// Skill collection path relative to `root`.
    pub skills_subdir: PathBuf,
    /// The single skill pulled from the app.
    pub skill: String,
    /// Nested directory under the skill that receives support files.
    pub support_dir: String,
    /// Support files at `root`, matched by exact name.
    pub support_files: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_APP_ROOT),
            skills_subdir: PathBuf::from("cortex_code_skill/skills"),
            skill: "hybrid-table-query-analyzer".to_string(),
            support_dir: "ht_analyzer".to_string(),
            support_files: vec![
                "analysis_shared.py".to_string(),
                "analysis_shared_sql.py".to_string(),
            ],
        }
    }
}

impl AppConfig {
    /// `<root>/<skills_subdir>`
    #[must_use]
    pub fn skills_dir(&self) -> PathBuf {
        self.root.join(&self.skills_subdir)
    }

    /// `<root>/<skills_subdir>/<skill>`
    #[must_use]
    pub fn skill_dir(&self) -> PathBuf {
        self.skills_dir().join(&self.skill)
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    user_skills_dir: Option<PathBuf>,
    app: Option<AppConfigPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct AppConfigPatch {
    root: Option<PathBuf>,
    skills_subdir: Option<PathBuf>,
    skill: Option<String>,
    support_dir: Option<String>,
    support_files: Option<Vec<String>>,
}

impl AppConfig {
    fn merge(&mut self, patch: AppConfigPatch) {
        if let Some(v) = patch.root {
            self.root = v;
        }
        if let Some(v) = patch.skills_subdir {
            self.skills_subdir = v;
        }
        if let Some(v) = patch.skill {
            self.skill = v;
        }
        if let Some(v) = patch.support_dir {
            self.support_dir = v;
        }
        if let Some(v) = patch.support_files {
            self.support_files = v;
        }
    }
}

impl Config {
    /// Defaults, then the config file (explicit path or global), then env.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| env_string(CONFIG_ENV).map(PathBuf::from));

        let patch = match explicit {
            Some(path) => Self::load_patch(&path)?,
            None => Self::load_global()?,
        };
        if let Some(patch) = patch {
            config.merge_patch(patch);
        }

        config.apply_env_overrides();
        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        // No config dir (e.g. stripped-down containers) just means no global file.
        match dirs::config_dir() {
            Some(dir) => Self::load_patch(&dir.join("skill-sync/config.toml")),
            None => Ok(None),
        }
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| SyncError::Config(format!("read config {}: {err}", path.display())))?;
        Self::parse_patch(&raw, path).map(Some)
    }

    fn parse_patch(raw: &str, path: &Path) -> Result<ConfigPatch> {
        toml::from_str(raw)
            .map_err(|err| SyncError::Config(format!("parse config {}: {err}", path.display())))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(dir) = patch.user_skills_dir {
            self.user_skills_dir = Some(dir);
        }
        if let Some(app) = patch.app {
            self.app.merge(app);
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Some(root) = env_path(APP_ROOT_ENV) {
            self.app.root = root;
        }
        if let Some(dir) = env_path(USER_SKILLS_DIR_ENV) {
            self.user_skills_dir = Some(dir);
        }
    }

    /// Resolve the user-level skill collection.
    pub fn user_skills_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.user_skills_dir {
            return Ok(dir.clone());
        }
        let home = dirs::home_dir()
            .ok_or_else(|| SyncError::MissingConfig("home directory not found".to_string()))?;
        Ok(home.join(".snowflake/cortex/skills"))
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn env_path(key: &str) -> Option<PathBuf> {
    env_string(key)
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_hybrid_table_skill() {
        let config = Config::default();
        assert_eq!(config.app.skill, "hybrid-table-query-analyzer");
        assert_eq!(config.app.support_dir, "ht_analyzer");
        assert_eq!(
            config.app.skill_dir(),
            PathBuf::from(DEFAULT_APP_ROOT)
                .join("cortex_code_skill/skills/hybrid-table-query-analyzer")
        );
        assert_eq!(
            config.app.support_files,
            vec!["analysis_shared.py", "analysis_shared_sql.py"]
        );
    }

    #[test]
    fn patch_overrides_only_given_fields() {
        let raw = r#"
user_skills_dir = "/tmp/skills"

[app]
root = "/srv/analyzer"
"#;
        let patch = Config::parse_patch(raw, Path::new("config.toml")).unwrap();
        let mut config = Config::default();
        config.merge_patch(patch);

        assert_eq!(config.user_skills_dir, Some(PathBuf::from("/tmp/skills")));
        assert_eq!(config.app.root, PathBuf::from("/srv/analyzer"));
        assert_eq!(config.app.skill, "hybrid-table-query-analyzer");
        assert_eq!(config.app.support_files.len(), 2);
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let err = Config::parse_patch("app = [", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, SyncError::Config(msg) if msg.contains("bad.toml")));
    }

    #[test]
    fn load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[app]\nskill = \"other-skill\"\n").unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.app.skill, "other-skill");
    }

    #[test]
    fn missing_explicit_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("absent.toml");
        let config = Config::load(Some(absent.as_path())).unwrap();
        assert_eq!(config.app.support_dir, "ht_analyzer");
    }

    #[test]
    fn explicit_user_skills_dir_wins_over_home() {
        let config = Config {
            user_skills_dir: Some(PathBuf::from("/x/skills")),
            ..Config::default()
        };
        assert_eq!(config.user_skills_dir().unwrap(), PathBuf::from("/x/skills"));
    }
}
