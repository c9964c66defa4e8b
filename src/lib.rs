//! skill-sync - Cortex Code skill synchronizer
//!
//! Mirrors skill collections between a repository checkout, the user-level
//! Cortex Code skill directory, and an external application's bundled skill.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod sync;
pub mod utils;

pub use error::{Result, SyncError};
