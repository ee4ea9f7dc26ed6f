use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::{Duration, Instant};

/// Progress configuration for determining whether to show progress bars
#[derive(Debug, Clone, Copy)]
pub enum ProgressConfig {
    /// Auto-detect based on TTY
    Auto,
    /// Force enable progress bars
    ForceEnable,
    /// Force disable progress bars
    ForceDisable,
}

impl ProgressConfig {
    /// Create a progress config from the --progress / --no-progress flags
    pub fn from_flags(progress_flag: bool, no_progress_flag: bool) -> Self {
        if progress_flag {
            ProgressConfig::ForceEnable
        } else if no_progress_flag {
            ProgressConfig::ForceDisable
        } else {
            ProgressConfig::Auto
        }
    }

    /// Determine if progress should be shown based on configuration
    pub fn should_show_progress(&self) -> bool {
        match self {
            ProgressConfig::Auto => atty::is(atty::Stream::Stderr),
            ProgressConfig::ForceEnable => true,
            ProgressConfig::ForceDisable => false,
        }
    }
}

/// Timer for tracking operation duration
#[derive(Debug, Clone)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Create and start a new timer
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed time in seconds as a formatted string
    pub fn elapsed_string(&self) -> String {
        let elapsed = self.start.elapsed();
        format!("{:.2}s", elapsed.as_secs_f64())
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

/// Progress tracker for item-based operations (e.g., files processed)
pub struct ItemProgress {
    bar: Option<ProgressBar>,
    enabled: bool,
}

impl ItemProgress {
    /// Create a new progress tracker for item-based operations
    pub fn new(total_items: u64, config: ProgressConfig, item_name: &str) -> Self {
        let enabled = config.should_show_progress();

        let bar = if enabled {
            let pb = ProgressBar::new(total_items);
            pb.set_draw_target(ProgressDrawTarget::stderr());
            let template = format!(
                "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} {{msg}}",
                item_name
            );
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(&template)
                    .expect("Invalid progress template")
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        Self { bar, enabled }
    }

    /// Increment progress by a number of items
    pub fn inc(&self, count: u64) {
        if let Some(ref bar) = self.bar {
            bar.inc(count);
        }
    }

    /// Set a message on the progress bar
    pub fn set_message(&self, msg: String) {
        if let Some(ref bar) = self.bar {
            bar.set_message(msg);
        }
    }

    /// Finish and clear the progress bar
    pub fn finish(self) {
        if let Some(bar) = self.bar {
            bar.finish_and_clear();
        }
    }

    /// Check if progress is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Spinner shown during the scan phase, where the number of entries is
/// unknown until the walk finishes
pub struct Spinner {
    bar: Option<ProgressBar>,
}

impl Spinner {
    /// Start a spinner with a message; a silent no-op when progress is off
    pub fn new(config: ProgressConfig, message: &str) -> Self {
        if !config.should_show_progress() {
            return Self { bar: None };
        }

        let pb = ProgressBar::new_spinner();
        pb.set_draw_target(ProgressDrawTarget::stderr());
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .expect("Invalid spinner template"),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(80));

        Self { bar: Some(pb) }
    }

    /// Clear the spinner once the phase it covers is done
    pub fn finish(self) {
        if let Some(bar) = self.bar {
            bar.finish_and_clear();
        }
    }

    pub fn is_active(&self) -> bool {
        self.bar.is_some()
    }
}
