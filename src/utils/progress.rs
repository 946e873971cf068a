use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner for one numbered pipeline step
pub struct StepProgress {
    bar: ProgressBar,
}

impl StepProgress {
    /// Start a spinner reading "Step {step}/{total}: {description}"
    pub fn start(step: u32, total: u32, description: &str, visible: bool) -> Self {
        let bar = if visible { ProgressBar::new_spinner() } else { ProgressBar::hidden() };
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
            bar.set_style(style);
        }
        bar.set_message(format!("Step {}/{}: {}", step, total, description));
        bar.enable_steady_tick(Duration::from_millis(120));

        StepProgress {
            bar,
        }
    }

    pub fn finish(&self, msg: &str) {
        self.bar.finish_with_message(msg.to_string());
    }

    pub fn abandon(&self, msg: &str) {
        self.bar.abandon_with_message(msg.to_string());
    }
}
