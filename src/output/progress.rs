use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressStyle};

use crate::project::ProgressSink;

/// Progress bar for project runs, drawn on stderr.
///
/// Hidden in quiet mode or when stderr is not a TTY.
pub struct ScanProgress {
    progress_bar: ProgressBar,
}

impl ScanProgress {
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        let is_tty = std::io::stderr().is_terminal();
        Self::new_with_visibility(quiet, is_tty)
    }

    fn new_with_visibility(quiet: bool, is_tty: bool) -> Self {
        let progress_bar = if quiet || !is_tty {
            ProgressBar::hidden()
        } else {
            Self::create_visible_progress_bar()
        };
        Self { progress_bar }
    }

    /// # Panics
    ///
    /// Panics if the progress bar template is invalid. The template is a constant.
    fn create_visible_progress_bar() -> ProgressBar {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}")
                .expect("valid template")
                .progress_chars("█▓░"),
        );
        pb
    }

    #[must_use]
    pub fn position(&self) -> u64 {
        self.progress_bar.position()
    }
}

impl ProgressSink for ScanProgress {
    fn begin(&self, total: usize) {
        self.progress_bar.set_length(total as u64);
    }

    fn report(&self, message: &str) {
        self.progress_bar.set_message(message.to_string());
        self.progress_bar.inc(1);
    }

    fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
