use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::local::PullStatus;
use crate::output;

/// Progress bar for model downloads reported by the local runtime.
///
/// Switches between a byte bar (while layers download) and a plain
/// status line (manifest, verification, and so on).
pub struct DownloadBar {
    progress_bar: ProgressBar,
}

impl DownloadBar {
    pub fn new(model: &str) -> Self {
        let progress_bar = ProgressBar::new(0);
        if output::is_quiet() {
            progress_bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        progress_bar.set_style(Self::status_style());
        progress_bar.set_message(format!("Preparing {model}"));
        Self { progress_bar }
    }

    fn status_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner} {msg}")
            .map_or_else(|_| ProgressStyle::default_spinner(), |s| s)
    }

    fn bytes_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "{msg} [{bar:32}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})",
        )
        .map_or_else(|_| ProgressStyle::default_bar(), |s| s.progress_chars("=> "))
    }

    pub fn update(&self, status: &PullStatus) {
        match (status.total, status.completed) {
            (Some(total), completed) if total > 0 => {
                if self.progress_bar.length() != Some(total) {
                    self.progress_bar.set_style(Self::bytes_style());
                    self.progress_bar.set_length(total);
                }
                self.progress_bar.set_position(completed.unwrap_or(0));
                self.progress_bar.set_message("Downloading");
            }
            _ => {
                self.progress_bar.set_style(Self::status_style());
                self.progress_bar.set_message(status.status.clone());
                self.progress_bar.tick();
            }
        }
    }

    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}

impl Drop for DownloadBar {
    fn drop(&mut self) {
        self.progress_bar.finish_and_clear();
    }
}
