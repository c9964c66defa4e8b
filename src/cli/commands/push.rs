//! skill-sync push - Install repo skills into the user skill directory

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_done, emit_human, emit_json, robot_ok};
use crate::error::Result;
use crate::sync::{self, MirrorOptions};

#[derive(Args, Debug, Default)]
pub struct PushArgs {
    /// Show what would change without writing
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(ctx: &AppContext, args: &PushArgs) -> Result<()> {
    let options = MirrorOptions {
        dry_run: args.dry_run,
    };
    let report = sync::push(&ctx.paths, options)?;

    if ctx.robot_mode {
        return emit_json(&robot_ok(&report));
    }
    if args.dry_run {
        let mut layout = HumanLayout::new();
        layout.title("Dry run: push").mirror_plan(&report);
        emit_human(layout);
    } else {
        emit_done(&format!(
            "Skills pushed to {}",
            ctx.paths.user_skills.display()
        ));
    }
    Ok(())
}
