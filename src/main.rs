use clap::{Parser, Subcommand};
use lotobet::adapters::{KafkaNotifier, PostgresStore};
use lotobet::config::{AppConfig, LoggingConfig};
use lotobet::error::Result;
use lotobet::services::InactivityScanner;
use std::sync::Arc;
use tokio::signal;
use tokio::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lotobet", about = "Lottery backend: inactivity reminder service")]
struct Cli {
    /// Directory holding default.toml / <env>.toml configuration
    #[arg(long, default_value = "config")]
    config_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run migrations and the recurring inactivity scanner until ctrl-c
    Serve,
    /// Run a single inactivity scan and exit
    Scan,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_from(&cli.config_dir)?;
    init_logging(&config.logging);

    if let Err(errors) = config.validate() {
        for e in &errors {
            error!("Invalid configuration: {}", e);
        }
        std::process::exit(1);
    }

    let store = PostgresStore::new(&config.database.url, config.database.max_connections).await?;
    store.migrate().await?;

    let notifier = Arc::new(KafkaNotifier::new(&config.kafka)?);

    let scanner = Arc::new(InactivityScanner::new(
        Arc::new(store.clone()),
        Arc::new(store),
        notifier,
        chrono::Duration::days(config.scanner.window_days),
    ));

    match cli.command {
        Commands::Serve => {
            info!(
                interval_secs = config.scanner.interval_secs,
                window_days = config.scanner.window_days,
                "Starting inactivity scanner"
            );

            let mut handle = scanner.start(Duration::from_secs(config.scanner.interval_secs));

            tokio::select! {
                _ = signal::ctrl_c() => {
                    info!("Shutdown signal received");
                    handle.abort();
                }
                result = &mut handle => {
                    error!("Scanner task ended unexpectedly: {:?}", result);
                }
            }
        }
        Commands::Scan => {
            let report = scanner.run_scan().await?;
            info!(
                inactive = report.inactive.len(),
                notified = report.notified,
                failed = report.failed,
                "One-shot scan finished"
            );
        }
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},sqlx=warn", config.level)));

    if config.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
