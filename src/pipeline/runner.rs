use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use crate::db::Database;
use crate::errors::{with_retry, TriggerError};
use crate::models::AlertSummary;
use crate::reporting::write_report;
use crate::utils::format_duration;
use crate::zap::ScannerApi;
use super::events::ScanEvent;
use super::state::{PipelineConfig, ScanOutcome};
use tracing::{info, warn, error};

/// Drives one active scan from start to persisted report.
pub struct ScanPipeline {
    config: PipelineConfig,
    scanner: Arc<dyn ScannerApi>,
    db: Database,
    cancel_token: CancellationToken,
    event_tx: Option<mpsc::UnboundedSender<ScanEvent>>,
}

impl ScanPipeline {
    pub fn new(config: PipelineConfig, scanner: Arc<dyn ScannerApi>, db: Database) -> Self {
        Self {
            config,
            scanner,
            db,
            cancel_token: CancellationToken::new(),
            event_tx: None,
        }
    }

    /// Replace the pipeline's cancel token with an external one (e.g. wired to Ctrl-C).
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    pub fn with_events(mut self, tx: mpsc::UnboundedSender<ScanEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    fn emit(&self, event: ScanEvent) {
        if let Some(tx) = &self.event_tx {
            let _ = tx.send(event);
        }
    }

    pub async fn run(&self) -> Result<ScanOutcome, TriggerError> {
        let result = self.run_inner().await;
        match &result {
            Ok(outcome) => {
                info!(
                    scan_id = outcome.scan_id,
                    high = outcome.alerts.high,
                    medium = outcome.alerts.medium,
                    low = outcome.alerts.low,
                    informational = outcome.alerts.informational,
                    report = %outcome.report.file_name,
                    "Scan completed"
                );
            }
            Err(e) => {
                error!(error = %e, "Scan workflow failed");
                self.emit(ScanEvent::Failed { error: e.to_string() });
            }
        }
        result
    }

    async fn run_inner(&self) -> Result<ScanOutcome, TriggerError> {
        let started = Instant::now();
        let deadline = self.config.max_duration.map(|max| started + max);

        info!(host = %self.scanner.host(), context_id = self.config.context_id, "Starting zap scan");
        let scan_id = self.scanner.start_scan(self.config.context_id).await?;
        info!(scan_id, "Scan accepted");
        self.emit(ScanEvent::ScanStarted { scan_id, context_id: self.config.context_id });

        self.db.upsert_scan(scan_id, 0, &AlertSummary::default(), "")?;

        let mut progress = self.interruptible(scan_id, 0, deadline, self.poll_progress(scan_id)).await?;
        while progress < 100 {
            info!(scan_id, progress, "Scan progress");
            self.emit(ScanEvent::Progress { scan_id, progress });

            let pause = async {
                tokio::time::sleep(self.config.poll_interval).await;
                Ok(())
            };
            self.interruptible(scan_id, progress, deadline, pause).await?;

            progress = self.interruptible(scan_id, progress, deadline, self.poll_progress(scan_id)).await?;
            self.db.upsert_scan(scan_id, progress, &AlertSummary::default(), "")?;
        }
        self.emit(ScanEvent::Progress { scan_id, progress });
        self.emit(ScanEvent::Collecting { scan_id });

        // The scan has finished, so only cancellation applies from here on
        let scanner = &self.scanner;
        let alerts = self.interruptible(
            scan_id,
            progress,
            None,
            with_retry("alerts_summary", &self.config.retry, || scanner.alerts_summary()),
        ).await?;
        let html = self.interruptible(
            scan_id,
            progress,
            None,
            with_retry("html_report", &self.config.retry, || scanner.html_report()),
        ).await?;
        let report = write_report(&self.config.reports_dir, scan_id, &html).await?;
        self.emit(ScanEvent::ReportWritten { file_name: report.file_name.clone() });

        self.db.upsert_scan(scan_id, progress, &alerts, &report.file_name)?;

        let duration_ms = started.elapsed().as_millis() as u64;
        self.emit(ScanEvent::Completed { scan_id, alerts, duration_ms });

        Ok(ScanOutcome { scan_id, progress, alerts, report, duration_ms })
    }

    /// Run `operation` unless the cancel token fires or `deadline` passes first.
    /// Either interruption stops the scanner-side scan.
    async fn interruptible<T, F>(
        &self,
        scan_id: i64,
        progress: u8,
        deadline: Option<Instant>,
        operation: F,
    ) -> Result<T, TriggerError>
    where
        F: Future<Output = Result<T, TriggerError>>,
    {
        tokio::select! {
            result = operation => result,
            _ = self.cancel_token.cancelled() => {
                warn!(scan_id, progress, "Cancellation requested");
                self.abort_scan(scan_id).await;
                Err(TriggerError::Cancelled(format!(
                    "Scan {} interrupted at {}%", scan_id, progress
                )))
            }
            _ = wait_until(deadline) => {
                let limit = self.config.max_duration.unwrap_or_default();
                warn!(scan_id, progress, "Scan exceeded max duration");
                self.abort_scan(scan_id).await;
                Err(TriggerError::Timeout(format!(
                    "Scan {} did not finish within {} (last progress {}%)",
                    scan_id, format_duration(limit.as_millis() as u64), progress
                )))
            }
        }
    }

    async fn poll_progress(&self, scan_id: i64) -> Result<u8, TriggerError> {
        let scanner = &self.scanner;
        with_retry("scan_progress", &self.config.retry, || scanner.scan_progress(scan_id)).await
    }

    /// Best-effort stop; the local record keeps its last persisted progress.
    async fn abort_scan(&self, scan_id: i64) {
        match self.scanner.stop_scan(scan_id).await {
            Ok(()) => info!(scan_id, "Asked scanner to stop scan"),
            Err(e) => warn!(scan_id, error = %e, "Failed to stop scan"),
        }
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending::<()>().await,
    }
}
