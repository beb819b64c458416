use std::time::{Duration, Instant};
use indicatif::{ProgressBar, ProgressStyle};
use console::style;
use crate::models::Severity;
use crate::pipeline::ScanEvent;
use crate::utils::format_duration;

/// Renders pipeline events as a single indicatif progress bar.
pub struct ScanProgress {
    bar: ProgressBar,
    start_time: Instant,
}

impl ScanProgress {
    pub fn new(visible: bool) -> Self {
        let bar = if visible { ProgressBar::new(100) } else { ProgressBar::hidden() };
        bar.set_style(
            ProgressStyle::default_bar()
                .template("  {spinner:.cyan} {bar:30.cyan/dark_gray} {pos:>3}% | {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░")
        );
        bar.set_message("Starting scan...");
        bar.enable_steady_tick(Duration::from_millis(120));

        Self { bar, start_time: Instant::now() }
    }

    /// Handle a pipeline event and update the bar accordingly.
    pub fn handle_event(&mut self, event: &ScanEvent) {
        match event {
            ScanEvent::ScanStarted { scan_id, context_id } => {
                self.bar.set_message(format!("scan {} (context {})", scan_id, context_id));
            }
            ScanEvent::Progress { scan_id, progress } => {
                self.bar.set_position(u64::from(*progress));
                self.bar.set_message(format!(
                    "scan {} | {}",
                    scan_id,
                    format_duration(self.start_time.elapsed().as_millis() as u64),
                ));
            }
            ScanEvent::Collecting { scan_id } => {
                self.bar.set_message(format!("scan {} | fetching summary and report", scan_id));
            }
            ScanEvent::ReportWritten { file_name } => {
                self.bar.println(format!("  {} Report written: {}", style("✓").green(), file_name));
            }
            ScanEvent::Completed { scan_id, alerts, duration_ms } => {
                let counts: Vec<String> = Severity::ALL.iter()
                    .map(|s| format!("{} {}", alerts.get(*s), s))
                    .collect();
                self.bar.finish_with_message(format!(
                    "scan {} complete in {}: {}",
                    scan_id,
                    format_duration(*duration_ms),
                    counts.join(", "),
                ));
            }
            ScanEvent::Failed { error } => {
                self.bar.abandon_with_message(format!("{} {}", style("failed:").red(), error));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AlertSummary;

    #[test]
    fn test_hidden_progress_tracks_position() {
        let mut progress = ScanProgress::new(false);
        progress.handle_event(&ScanEvent::ScanStarted { scan_id: 1, context_id: 1 });
        progress.handle_event(&ScanEvent::Progress { scan_id: 1, progress: 42 });
        assert_eq!(progress.bar.position(), 42);

        progress.handle_event(&ScanEvent::Completed {
            scan_id: 1,
            alerts: AlertSummary::default(),
            duration_ms: 10,
        });
        assert!(progress.bar.is_finished());
    }
}
