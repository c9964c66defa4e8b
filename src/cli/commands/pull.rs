//! skill-sync pull - Copy the user skill directory back into the repo

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_done, emit_human, emit_json, robot_ok};
use crate::error::Result;
use crate::sync::{self, MirrorOptions};

#[derive(Args, Debug, Default)]
pub struct PullArgs {
    /// Show what would change without writing
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(ctx: &AppContext, args: &PullArgs) -> Result<()> {
    let options = MirrorOptions {
        dry_run: args.dry_run,
    };
    let report = sync::pull(&ctx.paths, options)?;

    if ctx.robot_mode {
        return emit_json(&robot_ok(&report));
    }
    if args.dry_run {
        let mut layout = HumanLayout::new();
        layout.title("Dry run: pull").mirror_plan(&report);
        emit_human(layout);
    } else {
        emit_done(&format!(
            "Skills pulled from {} into {}",
            ctx.paths.user_skills.display(),
            ctx.paths.repo_root.display()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    #[test]
    fn parse_pull() {
        let cli = crate::cli::Cli::parse_from(["skill-sync", "pull"]);
        if let Some(crate::cli::Commands::Pull(pull)) = cli.command {
            assert!(!pull.dry_run);
        } else {
            panic!("expected pull command");
        }
    }
}
