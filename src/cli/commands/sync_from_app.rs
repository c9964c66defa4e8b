//! skill-sync sync-from-app - Refresh the analyzer skill from the app checkout

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_done, emit_human, emit_json, robot_ok};
use crate::error::Result;
use crate::sync::{MirrorOptions, sync_from_app};

#[derive(Args, Debug, Default)]
pub struct SyncFromAppArgs {
    /// Show what would change without writing
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(ctx: &AppContext, args: &SyncFromAppArgs) -> Result<()> {
    let app = &ctx.config.app;
    let options = MirrorOptions {
        dry_run: args.dry_run,
    };
    let report = sync_from_app(app, &ctx.paths.repo_skills, options)?;

    if ctx.robot_mode {
        return emit_json(&robot_ok(&report));
    }
    if args.dry_run {
        let mut layout = HumanLayout::new();
        layout
            .title("Dry run: sync-from-app")
            .mirror_plan(&report.mirror)
            .blank()
            .section("Support files")
            .kv("Into", &report.support_dir.display().to_string());
        for name in &report.support_files_copied {
            layout.bullet(name);
        }
        emit_human(layout);
    } else {
        emit_done(&format!(
            "Synced {} from {}",
            app.skill,
            app.root.display()
        ));
    }
    Ok(())
}
