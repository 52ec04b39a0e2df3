//! Progress bar for import cycles.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cartridges_import::ImportProgress;

/// Shows an import's queue as a progress bar.
///
/// The bar tracks `total_queue` as its length and the answered part of the
/// queue as its position. Hidden in quiet mode.
pub(crate) struct ImportBar {
    pb: ProgressBar,
}

impl ImportBar {
    pub(crate) fn new(quiet: bool) -> Self {
        let pb = if quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(0);
            if let Ok(style) =
                ProgressStyle::with_template("  {bar:30.cyan/blue} {pos}/{len} {wide_msg}")
            {
                pb.set_style(style.progress_chars("=> "));
            }
            pb
        };
        Self { pb }
    }

    pub(crate) fn clear(&self) {
        self.pb.finish_and_clear();
    }
}

impl ImportProgress for ImportBar {
    fn on_queued(&self, total_queue: usize, queue: usize) {
        self.pb.set_length(total_queue as u64);
        self.pb
            .set_position(total_queue.saturating_sub(queue) as u64);
    }

    fn on_game(&self, done: usize, total: usize, name: Option<&str>) {
        self.pb.set_length(total as u64);
        self.pb.set_position(done as u64);
        if let Some(name) = name {
            self.pb.set_message(name.to_string());
            log::debug!("Imported {}", name);
        }
    }

    fn on_phase(&self, message: &str) {
        self.pb.suspend(|| {
            log::info!("{}", message.if_supports_color(Stdout, |t| t.bold()));
        });
    }

    fn on_complete(&self, message: &str) {
        self.pb.finish_and_clear();
        log::info!("{}", message);
    }
}
