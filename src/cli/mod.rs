//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

pub mod commands;
pub mod output;

pub use commands::Commands;

#[derive(Parser, Debug)]
#[command(
    name = "skill-sync",
    version,
    about = "Mirror Cortex Code skills between this repo and ~/.snowflake/cortex/skills"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Emit JSON on stdout instead of human output
    #[arg(long, global = true)]
    pub robot: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (default: <config dir>/skill-sync/config.toml)
    #[arg(long, global = true, env = "SKILL_SYNC_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Repository root holding `skills/` (default: located from the executable)
    #[arg(long, global = true, env = "SKILL_SYNC_REPO_ROOT", value_name = "PATH")]
    pub repo_root: Option<PathBuf>,
}

/// Short usage listing printed when no command, or an unknown one, is given.
#[must_use]
pub fn usage() -> String {
    let commands = [
        ("push", "Copy repo skills to ~/.snowflake/cortex/skills"),
        ("pull", "Copy ~/.snowflake/cortex/skills back into the repo"),
        (
            "sync-from-app",
            "Pull hybrid-table-query-analyzer (and support files) from the analyzer app",
        ),
        ("deploy", "Same as push"),
    ];

    let mut text = String::from("Usage: skill-sync <command> [--dry-run]\n\nCommands:\n");
    for (name, about) in commands {
        text.push_str(&format!("  {name:<15}{about}\n"));
    }
    text
}
