//! Download progress reporting
//!
//! Wraps an indicatif bar showing bytes transferred, total and percentage.
//! The bar is hidden when stderr is not a terminal so piped output stays clean.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::env;
use std::io::IsTerminal;

const BAR_TEMPLATE: &str =
    "    {msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({percent}%, {bytes_per_sec})";
const SPINNER_TEMPLATE: &str = "    {msg} {spinner} {bytes} ({bytes_per_sec})";

/// Helper to check if we should draw progress indicators
pub fn should_show_progress() -> bool {
    // Don't show if output is not a TTY (piped, redirected)
    if !std::io::stderr().is_terminal() {
        return false;
    }

    // Don't show if NO_COLOR is set
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    true
}

/// Progress bar for one download.
///
/// `total` comes from `Content-Length`; without it the bar degrades to a
/// spinner with a running byte count.
pub fn download_bar(name: &str, total: Option<u64>) -> ProgressBar {
    let pb = match total {
        Some(total) if total > 0 => {
            let pb = ProgressBar::new(total);
            if let Ok(style) = ProgressStyle::default_bar().template(BAR_TEMPLATE) {
                pb.set_style(style.progress_chars("#>-"));
            }
            pb
        }
        _ => {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template(SPINNER_TEMPLATE) {
                pb.set_style(style);
            }
            pb
        }
    };

    if !should_show_progress() {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }
    pb.set_message(name.to_string());
    pb
}

/// Percentage of `done` out of `total`, capped at 100
pub fn percent(done: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    ((done as f64 / total as f64) * 100.0).min(100.0) as u8
}
