//! Progress indicators with CI fallback

use super::context::UiContext;
use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar for batch resolution.
///
/// Shows an indicatif bar in interactive mode and stays silent otherwise;
/// per-item results are reported by the caller.
pub struct BatchProgress {
    bar: Option<ProgressBar>,
}

impl BatchProgress {
    /// Create a progress indicator for `total` items
    pub fn new(ctx: &UiContext, label: &str, total: u64) -> Self {
        let bar = if ctx.use_fancy_output() {
            let bar = ProgressBar::new(total);
            let style = ProgressStyle::default_bar()
                .template("  {spinner:.cyan} {prefix}  {bar:20.cyan/dim} {pos}/{len} {msg:.dim}  {elapsed:.dim}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
                .progress_chars("━╸─");
            bar.set_style(style);
            bar.set_prefix(label.to_string());
            bar.enable_steady_tick(std::time::Duration::from_millis(120));
            Some(bar)
        } else {
            None
        };
        Self { bar }
    }

    /// Record one finished item
    pub fn advance(&self, item: &str) {
        if let Some(ref bar) = self.bar {
            bar.set_message(shorten(item, 40));
            bar.inc(1);
        }
    }

    /// Print a line without tearing the bar
    pub fn println(&self, line: &str) {
        match self.bar {
            Some(ref bar) => bar.println(line),
            None => eprintln!("{}", line),
        }
    }

    /// Finish and clear the progress bar
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.disable_steady_tick();
            bar.finish_and_clear();
        }
    }
}

/// Keep the tail of long paths, which carries the file name
fn shorten(item: &str, max: usize) -> String {
    let count = item.chars().count();
    if count <= max {
        return item.to_string();
    }
    let tail: String = item.chars().skip(count - (max - 3)).collect();
    format!("...{}", tail)
}
