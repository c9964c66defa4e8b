//! Error types for skill-sync.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{action} {}: {source}", path.display())]
    Fs {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    #[error("Source directory not found: {}", path.display())]
    SourceMissing { path: PathBuf },

    #[error("refusing to mirror {} onto {}: paths overlap", from.display(), to.display())]
    OverlappingPaths { from: PathBuf, to: PathBuf },

    #[error("{0}")]
    Usage(String),
}

impl SyncError {
    /// Stable machine-readable code for robot output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io(_) | Self::Fs { .. } | Self::Walk { .. } => "io_error",
            Self::OverlappingPaths { .. } => "overlapping_paths",
            Self::Config(_) => "config_error",
            Self::MissingConfig(_) => "missing_config",
            Self::SourceMissing { .. } => "source_missing",
            Self::Usage(_) => "usage",
        }
    }
}

/// Attach the failing action and path to an IO error.
pub fn fs_err(action: &'static str, path: &std::path::Path) -> impl FnOnce(std::io::Error) -> SyncError {
    let path = path.to_path_buf();
    move |source| SyncError::Fs {
        action,
        path,
        source,
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
