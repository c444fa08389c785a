//! Resolve command - print the cached variant of one source

use super::{disk_resolver, run_blocking};
use crate::cache::Outcome;
use crate::cli::args::ResolveArgs;
use crate::config::Config;
use crate::error::ImgCacheResult;
use crate::store::AssetStore;
use crate::ui::{self, UiContext};
use tracing::debug;

/// Execute the resolve command
pub async fn execute(args: ResolveArgs, config: &Config) -> ImgCacheResult<()> {
    let resolver = disk_resolver(config);
    let spec = args.transform.apply(config.transform_spec());
    let source = args.path.clone();

    let (resolver, resolution) = run_blocking(move || {
        let resolution = resolver.resolve_detailed(Some(&source), &spec)?;
        Ok((resolver, resolution))
    })
    .await?;

    let Some(resolution) = resolution else {
        let ctx = UiContext::detect();
        ui::step_warn(&ctx, &format!("No source image at {}", args.path));
        return Ok(());
    };

    match resolution.outcome {
        Outcome::Hit => debug!("Served {} from cache", resolution.path.display()),
        Outcome::Generated { dimensions, reaped } => debug!(
            "Generated {}x{} variant, reaped {}",
            dimensions.width, dimensions.height, reaped
        ),
    }

    let printed = if args.absolute {
        resolver.store().absolute_path(&resolution.path)
    } else {
        resolution.path
    };
    println!("{}", printed.display());
    Ok(())
}
