//! Warm command - generate variants for many sources concurrently

use super::disk_resolver;
use crate::cache::{CacheResolver, Outcome, Resolution};
use crate::cli::args::WarmArgs;
use crate::config::Config;
use crate::error::{ImgCacheError, ImgCacheResult};
use crate::store::DiskStore;
use crate::transform::TransformSpec;
use crate::ui::{self, BatchProgress, UiContext};
use console::style;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::debug;

/// Tally of a warm run
#[derive(Debug, Default, PartialEq, Eq)]
struct WarmSummary {
    generated: usize,
    hits: usize,
    missing: usize,
    failed: usize,
}

impl WarmSummary {
    fn record(&mut self, result: &ImgCacheResult<Option<Resolution>>) {
        match result {
            Ok(Some(resolution)) => match resolution.outcome {
                Outcome::Hit => self.hits += 1,
                Outcome::Generated { .. } => self.generated += 1,
            },
            Ok(None) => self.missing += 1,
            Err(_) => self.failed += 1,
        }
    }

    fn total(&self) -> usize {
        self.generated + self.hits + self.missing + self.failed
    }
}

/// Execute the warm command
pub async fn execute(args: WarmArgs, config: &Config) -> ImgCacheResult<()> {
    let ctx = UiContext::detect();
    let resolver = Arc::new(disk_resolver(config));
    let spec = args.transform.apply(config.transform_spec());
    spec.validate()?;

    let jobs = args.jobs.unwrap_or(config.cache.jobs).max(1);
    debug!("Warming {} sources with {} jobs", args.paths.len(), jobs);

    let progress = BatchProgress::new(&ctx, "warming", args.paths.len() as u64);
    let mut tasks = spawn_all(resolver, spec, args.paths, jobs);
    let mut summary = WarmSummary::default();

    while let Some(joined) = tasks.join_next().await {
        let (path, result) =
            joined.map_err(|e| ImgCacheError::Internal(format!("warm task failed: {}", e)))?;
        summary.record(&result);

        match &result {
            Ok(Some(_)) => {}
            Ok(None) => progress.println(&format!(
                "  {} {} (not found)",
                style("-").dim(),
                path
            )),
            Err(e) => progress.println(&format!("  {} {}: {}", style("✗").red(), path, e)),
        }
        progress.advance(&path);
    }
    progress.finish();

    ui::step_ok_detail(
        &ctx,
        &format!("Warmed {} source(s)", summary.total()),
        &format!(
            "{} generated, {} cached, {} missing, {} failed",
            summary.generated, summary.hits, summary.missing, summary.failed
        ),
    );

    if summary.failed > 0 {
        return Err(ImgCacheError::BatchFailed {
            failed: summary.failed,
            total: summary.total(),
        });
    }
    Ok(())
}

/// Spawn one blocking resolution per path, at most `jobs` at a time
fn spawn_all(
    resolver: Arc<CacheResolver<DiskStore>>,
    spec: TransformSpec,
    paths: Vec<String>,
    jobs: usize,
) -> JoinSet<(String, ImgCacheResult<Option<Resolution>>)> {
    let semaphore = Arc::new(Semaphore::new(jobs));
    let mut tasks = JoinSet::new();

    for path in paths {
        let resolver = Arc::clone(&resolver);
        let semaphore = Arc::clone(&semaphore);
        tasks.spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    let err = ImgCacheError::Internal(format!("semaphore closed: {}", e));
                    return (path, Err(err));
                }
            };

            let source = path.clone();
            let result = tokio::task::spawn_blocking(move || {
                resolver.resolve_detailed(Some(&source), &spec)
            })
            .await
            .unwrap_or_else(|e| Err(ImgCacheError::Internal(format!("resolution panicked: {}", e))));

            (path, result)
        });
    }

    tasks
}
