//! Progress indicators for long-running operations using indicatif.

use std::io::{self, IsTerminal};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// A spinner on stderr for indeterminate progress.
///
/// Hidden when stderr is not a terminal or output is quiet.
pub struct Spinner {
    bar: Option<ProgressBar>,
}

impl Spinner {
    /// Create a new spinner with the given message.
    pub fn new(message: &str, quiet: bool) -> Self {
        let bar = if !quiet && io::stderr().is_terminal() {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}...") {
                pb.set_style(style.tick_strings(&["|", "/", "-", "\\", ""]));
            }
            pb.set_message(message.to_string());
            Some(pb)
        } else {
            None
        };
        Self { bar }
    }

    /// Begin animating.
    pub fn start(&self) {
        if let Some(bar) = &self.bar {
            bar.enable_steady_tick(Duration::from_millis(80));
        }
    }

    /// Remove the spinner line.
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.finish();
    }
}

/// Run `work` while a spinner is shown.
pub fn with_spinner<T>(message: &str, quiet: bool, work: impl FnOnce() -> T) -> T {
    let spinner = Spinner::new(message, quiet);
    spinner.start();
    let result = work();
    spinner.finish();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_spinner_is_hidden() {
        let spinner = Spinner::new("Deriving key", true);
        assert!(spinner.bar.is_none());
        spinner.start();
        spinner.finish();
    }

    #[test]
    fn test_with_spinner_returns_result() {
        assert_eq!(with_spinner("Working", true, || 41 + 1), 42);
    }
}
