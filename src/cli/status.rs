use crate::cli::commands::StatusArgs;
use crate::config::Overrides;
use crate::errors::TriggerError;
use crate::zap::{ScannerApi, ZapClient};
use tracing::info;

pub async fn handle_status(args: StatusArgs) -> Result<(), TriggerError> {
    let overrides = Overrides {
        host: args.scanner.host.clone(),
        api_key: args.scanner.api_key.clone(),
        ..Default::default()
    };
    let settings = super::load_settings(args.scanner.config.as_deref(), &overrides).await?;
    let client = ZapClient::from_settings(&settings)?;

    info!(scan_id = args.scan_id, "Querying scan status");
    let progress = client.scan_progress(args.scan_id).await?;

    if args.json {
        let status = serde_json::json!({
            "scan_id": args.scan_id,
            "progress": progress,
            "complete": progress >= 100,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("Scan {}: {}%", args.scan_id, progress);
    }
    Ok(())
}
