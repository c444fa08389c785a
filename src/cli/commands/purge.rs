//! Purge command - remove stale and orphaned variants

use super::list::source_dir;
use super::{disk_resolver, run_blocking};
use crate::cache::{inspect, purge, PurgeScope};
use crate::cli::args::PurgeArgs;
use crate::config::Config;
use crate::error::ImgCacheResult;
use crate::ui::{self, UiContext};

/// Execute the purge command
pub async fn execute(args: PurgeArgs, config: &Config) -> ImgCacheResult<()> {
    let ctx = UiContext::detect();
    let resolver = disk_resolver(config);
    let dir = source_dir(&args.dir)?;
    let scope = if args.all {
        PurgeScope::All
    } else {
        PurgeScope::Outdated
    };
    let dry_run = args.dry_run;

    let report = run_blocking(move || {
        let variants = inspect(resolver.store(), &dir, resolver.options())?;
        Ok(purge(resolver.store(), &variants, scope, dry_run))
    })
    .await?;

    if report.removed.is_empty() && report.failed.is_empty() {
        ui::step_info(&ctx, &format!("Nothing to purge in {}", args.dir));
        return Ok(());
    }

    if dry_run {
        ui::section(&ctx, "Would remove:");
        for path in &report.removed {
            ui::step_info(&ctx, &path.display().to_string());
        }
        return Ok(());
    }

    for (path, reason) in &report.failed {
        ui::step_error(&ctx, &format!("{}: {}", path.display(), reason));
    }
    ui::step_ok(
        &ctx,
        &format!("Removed {} variant(s) from {}", report.removed.len(), args.dir),
    );

    Ok(())
}
