use clap::{Parser, Subcommand, Args, ValueEnum};
use std::sync::LazyLock;
use crate::config::Overrides;

static LONG_VERSION: LazyLock<String> = LazyLock::new(|| {
    format!(
        "{} ({} {})",
        env!("CARGO_PKG_VERSION"),
        option_env!("ZAPTRIGGER_GIT_HASH").unwrap_or("dev"),
        option_env!("ZAPTRIGGER_BUILD_DATE").unwrap_or("unknown"),
    )
});

#[derive(Parser)]
#[command(
    name = "zaptrigger",
    version,
    long_version = LONG_VERSION.as_str(),
    about = "Trigger and track OWASP ZAP active scans"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log line format
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an active scan, wait for it, and store the report
    Run(RunArgs),
    /// Ask the scanner for the progress of a scan
    Status(StatusArgs),
    /// List locally recorded scans
    List(ListArgs),
    /// Show one locally recorded scan
    Show(ShowArgs),
    /// Delete a locally recorded scan
    Delete(DeleteArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Connection options shared by commands that talk to the scanner.
#[derive(Args, Clone, Default)]
pub struct ScannerArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Scanner API base URL
    #[arg(long)]
    pub host: Option<String>,

    /// Scanner API key (or set ZAP_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,
}

#[derive(Args, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub scanner: ScannerArgs,

    /// Scanner context to scan
    #[arg(long)]
    pub context_id: Option<u32>,

    /// Seconds between status polls
    #[arg(long)]
    pub interval: Option<u64>,

    /// Abort the scan after this many seconds
    #[arg(long)]
    pub max_duration: Option<u64>,

    /// SQLite database path
    #[arg(long)]
    pub db: Option<String>,

    /// Directory for HTML reports
    #[arg(long)]
    pub reports: Option<String>,
}

impl RunArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            host: self.scanner.host.clone(),
            api_key: self.scanner.api_key.clone(),
            context_id: self.context_id,
            poll_interval_secs: self.interval,
            max_duration_secs: self.max_duration,
            database: self.db.clone(),
            reports_dir: self.reports.clone(),
        }
    }
}

#[derive(Args, Clone)]
pub struct StatusArgs {
    /// Scanner-assigned scan ID
    pub scan_id: i64,

    #[command(flatten)]
    pub scanner: ScannerArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct ListArgs {
    /// SQLite database path
    #[arg(long)]
    pub db: Option<String>,

    /// Maximum number of records
    #[arg(long, default_value = "20")]
    pub limit: usize,

    /// Records to skip
    #[arg(long, default_value = "0")]
    pub offset: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct ShowArgs {
    /// Scanner-assigned scan ID
    pub scan_id: i64,

    /// SQLite database path
    #[arg(long)]
    pub db: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct DeleteArgs {
    /// Scanner-assigned scan ID
    pub scan_id: i64,

    /// SQLite database path
    #[arg(long)]
    pub db: Option<String>,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_args() {
        let cli = Cli::parse_from([
            "zaptrigger", "-v", "run", "--host", "http://zap:8080", "--context-id", "3", "--interval", "10",
        ]);
        assert_eq!(cli.verbose, 1);
        assert_eq!(cli.log_format, LogFormat::Text);
        match cli.command {
            Commands::Run(args) => {
                let o = args.overrides();
                assert_eq!(o.host.as_deref(), Some("http://zap:8080"));
                assert_eq!(o.context_id, Some(3));
                assert_eq!(o.poll_interval_secs, Some(10));
                assert!(o.database.is_none());
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_parse_json_log_format() {
        let cli = Cli::parse_from(["zaptrigger", "list", "--log-format", "json"]);
        assert_eq!(cli.log_format, LogFormat::Json);
        assert!(Cli::try_parse_from(["zaptrigger", "list", "--log-format", "xml"]).is_err());
    }

    #[test]
    fn test_parse_list_defaults() {
        let cli = Cli::parse_from(["zaptrigger", "list"]);
        match cli.command {
            Commands::List(args) => {
                assert_eq!(args.limit, 20);
                assert_eq!(args.offset, 0);
                assert!(!args.json);
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_parse_status_requires_scan_id() {
        assert!(Cli::try_parse_from(["zaptrigger", "status"]).is_err());
        assert!(Cli::try_parse_from(["zaptrigger", "status", "4", "--json"]).is_ok());
    }
}
