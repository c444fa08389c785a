//! imgcache - Resized image variant cache
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use imgcache::cli::{commands, Cli, Commands, LogFormat};
use imgcache::config::ConfigManager;
use imgcache::error::{ImgCacheError, ImgCacheResult};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> ImgCacheResult<()> {
    let cli = Cli::parse();

    // 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("imgcache=warn"),
        1 => EnvFilter::new("imgcache=info"),
        _ => EnvFilter::new("imgcache=debug"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    match cli.log_format {
        LogFormat::Text => subscriber.without_time().init(),
        LogFormat::Json => subscriber.json().init(),
    }

    // Completions don't need config loading
    if let Commands::Completions(args) = cli.command {
        commands::completions(args);
        return Ok(());
    }

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };

    let local_config_path = if cli.no_local {
        debug!("Local config discovery disabled (--no-local)");
        None
    } else {
        let cwd = std::env::current_dir()
            .map_err(|e| ImgCacheError::io("getting current directory", e))?;
        let found = ConfigManager::find_local_config(&cwd);
        if let Some(ref path) = found {
            debug!("Found local config: {}", path.display());
        }
        found
    };

    let mut config = config_manager
        .load_merged(local_config_path.as_deref())
        .await?;

    if let Some(root) = cli.root {
        config.store.root = root;
    }
    debug!("Asset root: {}", config.store.root.display());

    match cli.command {
        Commands::Completions(_) => unreachable!("Completions handled above"),
        Commands::Resolve(args) => commands::resolve(args, &config).await,
        Commands::Warm(args) => commands::warm(args, &config).await,
        Commands::List(args) => commands::list(args, &config).await,
        Commands::Purge(args) => commands::purge(args, &config).await,
        Commands::Resize(args) => commands::resize(args, &config).await,
        Commands::Config(args) => commands::config(args, &config, &config_manager).await,
    }
}
