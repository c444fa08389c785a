//! List command - show cached variants of a directory

use super::{disk_resolver, run_blocking};
use crate::cache::{inspect, VariantInfo, VariantStatus};
use crate::cli::args::{ListArgs, OutputFormat};
use crate::config::Config;
use crate::error::ImgCacheResult;
use crate::store::SourceImage;
use crate::ui::{self, UiContext};
use chrono::DateTime;
use console::style;
use serde::Serialize;
use std::path::PathBuf;

/// Execute the list command
pub async fn execute(args: ListArgs, config: &Config) -> ImgCacheResult<()> {
    let resolver = disk_resolver(config);
    let dir = source_dir(&args.dir)?;

    let variants = run_blocking(move || {
        inspect(resolver.store(), &dir, resolver.options())
    })
    .await?;

    if variants.is_empty() {
        match args.format {
            OutputFormat::Json => println!("[]"),
            OutputFormat::Plain => {}
            OutputFormat::Table => {
                let ctx = UiContext::detect();
                ui::step_info(&ctx, &format!("No cached variants in {}", args.dir));
            }
        }
        return Ok(());
    }

    match args.format {
        OutputFormat::Table => print_table(&variants),
        OutputFormat::Json => print_json(&variants)?,
        OutputFormat::Plain => print_plain(&variants),
    }

    Ok(())
}

/// Validate a directory argument the same way source paths are validated
pub(crate) fn source_dir(dir: &str) -> ImgCacheResult<PathBuf> {
    if dir.trim().is_empty() || dir.trim() == "." {
        return Ok(PathBuf::new());
    }
    Ok(SourceImage::locate(dir)?.relative_path)
}

/// Source modification time as a UTC date
fn describe_mtime(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| secs.to_string())
}

fn print_table(variants: &[VariantInfo]) {
    println!(
        "{:<40} {:<10} {:<8} {:<8} {:<18}",
        style("VARIANT").bold(),
        style("STATUS").bold(),
        style("SIZE").bold(),
        style("RATIO").bold(),
        style("SOURCE MTIME").bold()
    );
    println!("{}", "-".repeat(88));

    for variant in variants {
        let status = match variant.status {
            VariantStatus::Current => style("current").green(),
            VariantStatus::Stale => style("stale").yellow(),
            VariantStatus::Orphaned => style("orphaned").red(),
            VariantStatus::Foreign => style("foreign").dim(),
        };

        let (size, ratio, mtime) = match &variant.key {
            Some(key) => (
                key.size.to_string(),
                key.ratio.to_string(),
                describe_mtime(key.modified),
            ),
            None => ("-".to_string(), "-".to_string(), "-".to_string()),
        };

        println!(
            "{:<40} {:<10} {:<8} {:<8} {:<18}",
            variant.file_name, status, size, ratio, mtime
        );
    }

    println!();
    let outdated = variants.iter().filter(|v| v.status.is_outdated()).count();
    println!("Total: {} file(s), {} outdated", variants.len(), outdated);
}

fn print_json(variants: &[VariantInfo]) -> ImgCacheResult<()> {
    #[derive(Serialize)]
    struct VariantJson {
        path: String,
        status: VariantStatus,
        source: Option<String>,
        size: Option<u32>,
        ratio: Option<String>,
        quality: Option<u8>,
        modified: Option<u64>,
    }

    let json_variants: Vec<VariantJson> = variants
        .iter()
        .map(|v| VariantJson {
            path: v.path.display().to_string(),
            status: v.status,
            source: v.source.as_ref().map(|s| s.display().to_string()),
            size: v.key.as_ref().map(|k| k.size),
            ratio: v.key.as_ref().map(|k| k.ratio.to_string()),
            quality: v.key.as_ref().map(|k| k.quality),
            modified: v.key.as_ref().map(|k| k.modified),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&json_variants)?);
    Ok(())
}

fn print_plain(variants: &[VariantInfo]) {
    for variant in variants {
        println!("{}", variant.path.display());
    }
}
