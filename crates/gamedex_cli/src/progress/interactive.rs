use std::sync::Mutex;

use gamedex::links::LinkProgress;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Interactive progress reporter using indicatif.
pub struct InteractiveReporter {
    bar: Mutex<Option<ProgressBar>>,
    draw_target: fn() -> ProgressDrawTarget,
    broken: Mutex<usize>,
}

impl InteractiveReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
            draw_target: ProgressDrawTarget::stderr,
            broken: Mutex::new(0),
        }
    }

    /// A reporter that never draws.
    #[cfg(test)]
    pub fn hidden() -> Self {
        Self {
            draw_target: ProgressDrawTarget::hidden,
            ..Self::new()
        }
    }

    #[cfg(test)]
    pub fn broken_count(&self) -> usize {
        match self.broken.lock() {
            Ok(broken) => *broken,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    #[cfg(test)]
    pub fn is_finished(&self) -> bool {
        match self.bar.lock() {
            Ok(bar) => bar.as_ref().is_some_and(ProgressBar::is_finished),
            Err(poisoned) => poisoned.into_inner().as_ref().is_some_and(ProgressBar::is_finished),
        }
    }

    pub fn handle(&self, event: LinkProgress) {
        let mut bar = match self.bar.lock() {
            Ok(bar) => bar,
            Err(poisoned) => poisoned.into_inner(),
        };

        match event {
            LinkProgress::Started { distinct, .. } => {
                let pb = ProgressBar::with_draw_target(Some(distinct as u64), (self.draw_target)());
                pb.set_style(Self::bar_style());
                pb.set_prefix("Links");
                *bar = Some(pb);
            }

            LinkProgress::Checked { checked, .. } => {
                if let Some(pb) = bar.as_ref() {
                    pb.set_position(checked as u64);
                }
            }

            LinkProgress::Broken { url, reason } => {
                let mut broken = match self.broken.lock() {
                    Ok(broken) => broken,
                    Err(poisoned) => poisoned.into_inner(),
                };
                *broken += 1;
                if let Some(pb) = bar.as_ref() {
                    pb.set_message(format!("{} broken", *broken));
                    pb.println(format!("  {} {}", console::style("✗").red(), url));
                    pb.println(format!("    {}", console::style(reason).dim()));
                }
            }

            LinkProgress::Finished {
                checked,
                broken,
                skipped,
            } => {
                if let Some(pb) = bar.as_ref() {
                    let message = if skipped > 0 {
                        format!("{} checked, {} broken, {} skipped", checked, broken, skipped)
                    } else {
                        format!("{} checked, {} broken", checked, broken)
                    };
                    pb.finish_with_message(message);
                }
            }
        }
    }

    pub fn finish(&self) {
        let bar = match self.bar.lock() {
            Ok(bar) => bar,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(pb) = bar.as_ref()
            && !pb.is_finished()
        {
            pb.finish();
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos:>3}/{len:3} {msg}")
            .expect("Invalid template")
            .progress_chars("█▓░")
    }
}

impl Default for InteractiveReporter {
    fn default() -> Self {
        Self::new()
    }
}
