//! UI module for consistent CLI output
//!
//! Symbols and progress bars in interactive terminals, plain tagged lines
//! (`[OK]`, `[WARN]`) in CI and when stderr is redirected.

mod context;
mod output;
mod progress;

pub use context::UiContext;
pub use output::{
    key_value, section, step_error, step_info, step_ok, step_ok_detail, step_warn,
    step_warn_hint,
};
pub use progress::BatchProgress;
