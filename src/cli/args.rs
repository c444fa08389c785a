//! CLI argument definitions using clap derive

use crate::transform::{Ratio, TransformSpec};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// imgcache - Resized image variant cache
///
/// Generates resized JPEG variants of source images on first request and
/// keeps them next to the sources until the source changes.
#[derive(Parser, Debug)]
#[command(name = "imgcache")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "IMGCACHE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Skip local .imgcache.toml discovery
    #[arg(long, global = true)]
    pub no_local: bool,

    /// Asset root (overrides store.root from config)
    #[arg(short, long, global = true, env = "IMGCACHE_ROOT")]
    pub root: Option<PathBuf>,

    /// Log output format
    #[arg(long, global = true, default_value = "text")]
    pub log_format: LogFormat,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the cached variant path for a source, generating it if needed
    Resolve(ResolveArgs),

    /// Generate variants for many sources concurrently
    Warm(WarmArgs),

    /// List cached variants of a directory
    List(ListArgs),

    /// Remove stale and orphaned variants of a directory
    Purge(PurgeArgs),

    /// Resize a single file without caching
    Resize(ResizeArgs),

    /// Show or edit configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Transform overrides shared by several commands
#[derive(Parser, Debug, Clone, Default)]
pub struct TransformArgs {
    /// Longest edge of the bounding box in pixels
    #[arg(short, long)]
    pub size: Option<u32>,

    /// JPEG quality (1-100)
    #[arg(short, long)]
    pub quality: Option<u8>,

    /// Aspect ratio of the bounding box, as W:H
    #[arg(long)]
    pub ratio: Option<Ratio>,
}

impl TransformArgs {
    /// Apply the overrides on top of a default spec
    pub fn apply(&self, base: TransformSpec) -> TransformSpec {
        TransformSpec {
            size: self.size.unwrap_or(base.size),
            quality: self.quality.unwrap_or(base.quality),
            ratio: self.ratio.unwrap_or(base.ratio),
        }
    }
}

/// Arguments for the resolve command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Source path relative to the asset root
    pub path: String,

    #[command(flatten)]
    pub transform: TransformArgs,

    /// Print the absolute path instead of the root-relative one
    #[arg(long)]
    pub absolute: bool,
}

/// Arguments for the warm command
#[derive(Parser, Debug)]
pub struct WarmArgs {
    /// Source paths relative to the asset root
    #[arg(required = true)]
    pub paths: Vec<String>,

    #[command(flatten)]
    pub transform: TransformArgs,

    /// Concurrent resolutions (default: from config)
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Source directory relative to the asset root
    #[arg(default_value = ".")]
    pub dir: String,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the purge command
#[derive(Parser, Debug)]
pub struct PurgeArgs {
    /// Source directory relative to the asset root
    #[arg(default_value = ".")]
    pub dir: String,

    /// Remove every variant, not only stale and orphaned ones
    #[arg(long)]
    pub all: bool,

    /// Show what would be removed
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the resize command
#[derive(Parser, Debug)]
pub struct ResizeArgs {
    /// Source image file
    pub src: PathBuf,

    /// Destination file (written as JPEG)
    pub dest: PathBuf,

    #[command(flatten)]
    pub transform: TransformArgs,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Arguments for the completions command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: Shell,
}

/// Output format for list command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}
