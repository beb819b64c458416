use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use crate::cli::commands::RunArgs;
use crate::cli::progress::ScanProgress;
use crate::db::Database;
use crate::errors::TriggerError;
use crate::pipeline::{PipelineConfig, ScanEvent, ScanPipeline};
use crate::utils::format_duration;
use crate::zap::{ScannerApi, ZapClient};
use tracing::{info, warn};

pub async fn handle_run(args: RunArgs, quiet: bool) -> Result<(), TriggerError> {
    let settings = super::load_settings(args.scanner.config.as_deref(), &args.overrides()).await?;

    let db = Database::new(&settings.database)?;
    let scanner: Arc<dyn ScannerApi> = Arc::new(ZapClient::from_settings(&settings)?);

    // Ctrl-C stops the scanner-side scan instead of leaving it orphaned
    let cancel_token = CancellationToken::new();
    let ctrl_c_token = cancel_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping scan");
            ctrl_c_token.cancel();
        }
    });

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<ScanEvent>();
    let renderer = tokio::spawn(async move {
        let mut progress = ScanProgress::new(!quiet);
        while let Some(event) = event_rx.recv().await {
            progress.handle_event(&event);
        }
    });

    let pipeline = ScanPipeline::new(PipelineConfig::from_settings(&settings), scanner, db)
        .with_cancel_token(cancel_token)
        .with_events(event_tx);
    let result = pipeline.run().await;

    // Dropping the pipeline closes the channel so the renderer can drain and exit
    drop(pipeline);
    let _ = renderer.await;

    let outcome = result?;
    info!(
        scan_id = outcome.scan_id,
        total_alerts = outcome.alerts.total(),
        duration = %format_duration(outcome.duration_ms),
        report = %outcome.report.path.display(),
        "Scan stored"
    );
    Ok(())
}
