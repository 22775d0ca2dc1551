use indicatif::{ProgressBar, ProgressStyle};

use crate::download::DownloadProgress;
use crate::format::{format_duration, pretty_bytes};

const BAR_TEMPLATE: &str = "{bar:40.cyan/blue} {bytes}/{total_bytes} {percent:>3}% ({bytes_per_sec}) {msg}";
const SPINNER_TEMPLATE: &str = "{spinner:.blue} {bytes} ({bytes_per_sec}) {msg}";
const PB_CHARS: &str = "█▓▒░  ";

/// Terminal rendering of download progress. The bar is created on the first
/// report, once the declared total is known.
#[derive(Default)]
pub struct ProgressDisplay {
    bar: Option<ProgressBar>,
}

impl ProgressDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, progress: &DownloadProgress) {
        let bar = self.bar.get_or_insert_with(|| new_bar(progress.total_bytes));
        bar.set_position(progress.bytes_written);
        match progress.last_eta {
            Some(eta) => bar.set_message(format!("ETA {}", format_duration(eta))),
            None => bar.set_message(""),
        }
        if progress.total_bytes == 0 {
            bar.tick();
        }
    }

    /// Clear the bar and return a one-line summary.
    pub fn finish(&mut self, bytes: u64, elapsed: std::time::Duration) -> String {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
        format!(
            "Downloaded {} in {}",
            pretty_bytes(bytes),
            format_duration(elapsed)
        )
    }

    /// Drop the bar without a summary (failure paths).
    pub fn abandon(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.abandon();
        }
    }
}

fn new_bar(total_bytes: u64) -> ProgressBar {
    if total_bytes == 0 {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template(SPINNER_TEMPLATE) {
            bar.set_style(style);
        }
        bar
    } else {
        let bar = ProgressBar::new(total_bytes);
        if let Ok(style) = ProgressStyle::with_template(BAR_TEMPLATE) {
            bar.set_style(style.progress_chars(PB_CHARS));
        }
        bar
    }
}
