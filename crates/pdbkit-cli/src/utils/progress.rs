use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const SPINNER_TICK_MS: u64 = 80;

/// A single-line stderr spinner for blocking network operations.
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn start(message: impl Into<String>) -> Self {
        let pb = ProgressBar::new_spinner().with_style(Self::style());
        pb.set_draw_target(ProgressDrawTarget::stderr());
        pb.set_message(message.into());
        pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
        Self { pb }
    }

    /// A spinner that draws nothing, for `--quiet` runs.
    pub fn hidden() -> Self {
        let pb = ProgressBar::hidden().with_style(Self::style());
        Self { pb }
    }

    pub fn succeed(&self, message: impl Into<String>) {
        self.pb.disable_steady_tick();
        self.pb.finish_with_message(format!("✓ {}", message.into()));
    }

    pub fn fail(&self, message: impl Into<String>) {
        self.pb.disable_steady_tick();
        self.pb.abandon_with_message(format!("✗ {}", message.into()));
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}
