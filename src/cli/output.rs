use chrono::{DateTime, Utc};
use colored::Colorize;
use console::style;
use serde::Serialize;

use crate::error::{Result, SyncError};
use crate::sync::MirrorReport;

#[derive(Serialize)]
pub struct RobotResponse<T> {
    pub status: RobotStatus,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub data: T,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RobotStatus {
    Ok,
    Error { code: String, message: String },
}

pub fn robot_ok<T: Serialize>(data: T) -> RobotResponse<T> {
    RobotResponse {
        status: RobotStatus::Ok,
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        data,
    }
}

pub fn robot_error(
    code: impl Into<String>,
    message: impl Into<String>,
) -> RobotResponse<serde_json::Value> {
    RobotResponse {
        status: RobotStatus::Error {
            code: code.into(),
            message: message.into(),
        },
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        data: serde_json::Value::Null,
    }
}

pub fn emit_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value)
        .map_err(|err| SyncError::Config(format!("serialize output: {err}")))?;
    println!("{payload}");
    Ok(())
}

/// One-line success confirmation.
pub fn emit_done(message: &str) {
    println!("{} {message}", "✓".green().bold());
}

pub struct HumanLayout {
    lines: Vec<String>,
    key_width: usize,
}

impl Default for HumanLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanLayout {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            key_width: 14,
        }
    }

    pub fn title(&mut self, text: &str) -> &mut Self {
        self.lines.push(style(text).bold().to_string());
        self.lines.push(String::new());
        self
    }

    pub fn section(&mut self, text: &str) -> &mut Self {
        self.lines.push(style(text).bold().to_string());
        self.lines.push("-".repeat(text.len().max(3)));
        self
    }

    pub fn kv(&mut self, key: &str, value: &str) -> &mut Self {
        let key_style = style(key).dim().to_string();
        self.lines.push(format!(
            "{key_style:width$} {value}",
            width = self.key_width
        ));
        self
    }

    pub fn bullet(&mut self, text: &str) -> &mut Self {
        self.lines.push(format!("- {text}"));
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    #[must_use]
    pub fn build(self) -> String {
        self.lines.join("\n")
    }

    /// Summary of a planned mirror, used by `--dry-run`.
    pub fn mirror_plan(&mut self, report: &MirrorReport) -> &mut Self {
        self.kv("Source", &report.source.display().to_string())
            .kv("Destination", &report.destination.display().to_string())
            .kv("New dirs", &report.created_dirs.len().to_string())
            .kv("Copy", &report.copied.len().to_string())
            .kv("Remove", &report.removed.len().to_string())
            .kv("Unchanged", &report.unchanged.to_string());

        if !report.copied.is_empty() {
            self.blank().section("Copy");
            for path in &report.copied {
                self.bullet(&path.display().to_string());
            }
        }
        if !report.removed.is_empty() {
            self.blank().section("Remove");
            for path in &report.removed {
                self.bullet(&path.display().to_string());
            }
        }
        self
    }
}

pub fn emit_human(layout: HumanLayout) {
    println!("{}", layout.build());
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn mirror_plan_lists_changes() {
        let report = MirrorReport {
            source: PathBuf::from("/repo/skills"),
            destination: PathBuf::from("/home/u/.snowflake/cortex/skills"),
            copied: vec![PathBuf::from("a/SKILL.md")],
            removed: vec![PathBuf::from("extra.md")],
            dry_run: true,
            ..MirrorReport::default()
        };

        let mut layout = HumanLayout::new();
        layout.mirror_plan(&report);
        let text = layout.build();

        assert!(text.contains("- a/SKILL.md"));
        assert!(text.contains("- extra.md"));
        assert!(text.contains("/repo/skills"));
    }

    #[test]
    fn robot_error_serializes_code() {
        let json = serde_json::to_value(robot_error("source_missing", "nope")).unwrap();
        assert_eq!(json["status"]["error"]["code"], "source_missing");
        assert!(json["data"].is_null());
    }
}
