//! Progress indicators using indicatif

#![allow(clippy::expect_used)] // Templates are compile-time constants

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::application::ports::{ProgressReporter, Sleeper};
use crate::infra::clock::TokioSleeper;

/// Create a spinner for indeterminate progress.
///
/// # Panics
///
/// Panics if the spinner template string is invalid (it is a compile-time constant and will not panic).
#[must_use]
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&[
                "⠁", "⠂", "⠄", "⡀", "⡈", "⡐", "⡠", "⣀", "⣁", "⣂", "⣄", "⣌", "⣔", "⣤", "⣥", "⣦",
                "⣮", "⣶", "⣷", "⣿", "⡿", "⠿", "⢟", "⠟", "⡛", "⠛", "⠫", "⢋", "⠋", "⠍", "⡉", "⠉",
                "⠑", "⠡", "⢁",
            ])
            .template("  {spinner:.cyan} {msg}")
            .expect("valid template"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// `Sleeper` that shows a countdown spinner while waiting on a terminal.
pub struct SpinnerSleeper {
    show: bool,
}

impl SpinnerSleeper {
    #[must_use]
    pub fn new(show: bool) -> Self {
        Self { show }
    }
}

impl Sleeper for SpinnerSleeper {
    async fn sleep(&self, duration: Duration) {
        if !self.show || duration.is_zero() {
            TokioSleeper.sleep(duration).await;
            return;
        }
        let pb = spinner(&format!("waiting {}s...", duration.as_secs()));
        let mut remaining = duration;
        let tick = Duration::from_secs(1);
        while !remaining.is_zero() {
            let step = remaining.min(tick);
            TokioSleeper.sleep(step).await;
            remaining -= step;
            pb.set_message(format!("waiting {}s...", remaining.as_secs()));
        }
        pb.finish_and_clear();
    }
}

/// `ProgressReporter` that folds step messages into a single spinner line.
///
/// Used where a final report follows and per-step lines would be noise.
pub struct SpinnerReporter {
    pb: Option<ProgressBar>,
}

impl SpinnerReporter {
    /// Start a spinner when `show` is set; otherwise every event is dropped.
    #[must_use]
    pub fn new(show: bool, msg: &str) -> Self {
        Self {
            pb: show.then(|| spinner(msg)),
        }
    }

    /// Clear the spinner line.
    pub fn finish(&self) {
        if let Some(pb) = &self.pb {
            pb.finish_and_clear();
        }
    }
}

impl ProgressReporter for SpinnerReporter {
    fn step(&self, message: &str) {
        if let Some(pb) = &self.pb {
            pb.set_message(message.to_string());
        }
    }

    fn success(&self, _message: &str) {}

    fn warn(&self, message: &str) {
        if let Some(pb) = &self.pb {
            pb.println(format!("  ⚠ {message}"));
        }
    }

    fn logs(&self, _heading: &str, _body: &str) {}
}
