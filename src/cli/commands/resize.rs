//! Resize command - one-off aspect-fit resize without caching

use super::run_blocking;
use crate::cli::args::ResizeArgs;
use crate::config::Config;
use crate::error::ImgCacheResult;
use crate::resize::resize_file;
use crate::ui::{self, UiContext};

/// Execute the resize command
pub async fn execute(args: ResizeArgs, config: &Config) -> ImgCacheResult<()> {
    let spec = args.transform.apply(config.transform_spec());
    let (src, dest) = (args.src.clone(), args.dest.clone());

    let resized = run_blocking(move || resize_file(&src, &spec, &dest)).await?;

    let ctx = UiContext::detect();
    ui::step_ok_detail(
        &ctx,
        &format!("Wrote {}", args.dest.display()),
        &format!(
            "{} -> jpeg, {}x{}",
            resized.source_format, resized.dimensions.width, resized.dimensions.height
        ),
    );
    Ok(())
}
