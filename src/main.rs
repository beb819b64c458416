use clap::Parser;
use tracing_subscriber::EnvFilter;
use zaptrigger::cli;
use zaptrigger::config;
use zaptrigger::errors::TriggerError;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging
    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    match cli.log_format {
        cli::commands::LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(!cli.no_color)
                .init();
        }
        cli::commands::LogFormat::Json => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_target(false)
                .init();
        }
    }

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    let result = match cli.command {
        cli::Commands::Run(args) => cli::run::handle_run(args, cli.quiet).await,
        cli::Commands::Status(args) => cli::status::handle_status(args).await,
        cli::Commands::List(args) => cli::records::handle_list(args),
        cli::Commands::Show(args) => cli::records::handle_show(args),
        cli::Commands::Delete(args) => cli::records::handle_delete(args),
        cli::Commands::Validate(args) => handle_validate(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn handle_validate(args: cli::commands::ValidateArgs) -> Result<(), TriggerError> {
    let path = std::path::PathBuf::from(&args.config);
    let file_config = config::parse_config(&path).await?;
    config::resolve_settings(Some(&file_config), &config::Overrides::default())?;
    println!("Configuration is valid: {}", args.config);
    Ok(())
}
