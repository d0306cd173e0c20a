//! Progress reporting for the link check.
//!
//! - Interactive mode (TTY): a progress bar using indicatif
//! - Logging mode (non-TTY): structured logging using tracing

mod interactive;
mod logging;

use std::sync::Arc;

use console::Term;
use gamedex::links::{LinkProgress, LinkProgressCallback};

pub use interactive::InteractiveReporter;
pub use logging::LoggingReporter;

/// Progress reporter that handles both interactive and logging modes.
pub enum ProgressReporter {
    /// Interactive progress bar for TTY.
    Interactive(InteractiveReporter),
    /// Structured logging for non-TTY (CI, pipes).
    Logging(LoggingReporter),
}

impl ProgressReporter {
    /// Create a new progress reporter, auto-detecting TTY mode.
    pub fn new() -> Self {
        if Term::stdout().is_term() {
            Self::Interactive(InteractiveReporter::new())
        } else {
            Self::Logging(LoggingReporter::new())
        }
    }

    pub fn handle(&self, event: LinkProgress) {
        match self {
            Self::Interactive(r) => r.handle(event),
            Self::Logging(r) => r.handle(event),
        }
    }

    /// Convert to a callback for `check_links`.
    pub fn as_callback(self: &Arc<Self>) -> Box<LinkProgressCallback> {
        let reporter = Arc::clone(self);
        Box::new(move |event| reporter.handle(event))
    }

    /// Finish the progress bar (interactive mode only).
    pub fn finish(&self) {
        if let Self::Interactive(r) = self {
            r.finish();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use gamedex::links::BrokenReason;

    use super::*;

    fn run_all(reporter: &ProgressReporter) {
        reporter.handle(LinkProgress::Started {
            links: 4,
            distinct: 3,
        });
        reporter.handle(LinkProgress::Checked {
            checked: 1,
            total: 3,
        });
        reporter.handle(LinkProgress::Broken {
            url: "https://gone.example/".to_string(),
            reason: BrokenReason::Status(404),
        });
        reporter.handle(LinkProgress::Finished {
            checked: 3,
            broken: 1,
            skipped: 0,
        });
        reporter.finish();
    }

    #[test]
    fn logging_reporter_handles_every_event() {
        run_all(&ProgressReporter::Logging(LoggingReporter::new()));
    }

    #[test]
    fn interactive_reporter_counts_broken_and_finishes() {
        let reporter = ProgressReporter::Interactive(InteractiveReporter::hidden());
        run_all(&reporter);

        let ProgressReporter::Interactive(inner) = &reporter else {
            panic!("expected interactive reporter");
        };
        assert_eq!(inner.broken_count(), 1);
        assert!(inner.is_finished());
    }

    #[test]
    fn callback_forwards_events() {
        let reporter = Arc::new(ProgressReporter::Logging(LoggingReporter::new()));
        let callback = reporter.as_callback();
        callback(LinkProgress::Checked {
            checked: 50,
            total: 100,
        });
    }
}
