//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use clap::Subcommand;

pub mod pull;
pub mod push;
pub mod sync_from_app;

use crate::app::AppContext;
use crate::error::Result;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy repo skills to the user skill directory
    #[command(visible_alias = "deploy")]
    Push(push::PushArgs),

    /// Copy the user skill directory back into the repo
    Pull(pull::PullArgs),

    /// Pull hybrid-table-query-analyzer from the analyzer app
    SyncFromApp(sync_from_app::SyncFromAppArgs),
}

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Push(args) => push::run(ctx, args),
        Commands::Pull(args) => pull::run(ctx, args),
        Commands::SyncFromApp(args) => sync_from_app::run(ctx, args),
    }
}
