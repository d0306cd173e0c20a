use gamedex::links::{LinkProgress, PROGRESS_INTERVAL};
use tracing::Level;

/// Logging reporter using tracing for structured output.
pub struct LoggingReporter;

impl LoggingReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, event: LinkProgress) {
        match event {
            LinkProgress::Started { links, distinct } => {
                tracing::info!(links, distinct, "Checking external links");
            }

            LinkProgress::Checked { checked, total } => {
                if checked_level(checked) == Level::INFO {
                    tracing::info!(checked, total, "Checked links");
                } else {
                    tracing::debug!(checked, total, "Checked link");
                }
            }

            LinkProgress::Broken { url, reason } => {
                tracing::warn!(url = %url, reason = %reason, "Broken link");
            }

            LinkProgress::Finished {
                checked,
                broken,
                skipped,
            } => {
                tracing::info!(checked, broken, skipped, "Link check complete");
            }
        }
    }
}

/// Every `PROGRESS_INTERVAL`-th checked link is logged at info.
fn checked_level(checked: usize) -> Level {
    if checked > 0 && checked % PROGRESS_INTERVAL == 0 {
        Level::INFO
    } else {
        Level::DEBUG
    }
}

impl Default for LoggingReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_progress_is_info_every_interval() {
        assert_eq!(PROGRESS_INTERVAL, 50);
        assert_eq!(checked_level(1), Level::DEBUG);
        assert_eq!(checked_level(49), Level::DEBUG);
        assert_eq!(checked_level(50), Level::INFO);
        assert_eq!(checked_level(51), Level::DEBUG);
        assert_eq!(checked_level(100), Level::INFO);
    }

    #[test]
    fn nothing_checked_is_not_a_milestone() {
        assert_eq!(checked_level(0), Level::DEBUG);
    }
}
