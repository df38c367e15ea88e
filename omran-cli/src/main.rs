//! Omran CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use omran_app::OmranApp;
use omran_config::{load_config, AppConfig, LogFormat};
use omran_plugin_api::{InventoryUpdate, ReportKind, ReportRequest, SaleRequest, SyncRequest};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "omran")]
#[command(about = "Omran business plugin host", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to configuration file (built-in defaults when omitted)
    #[arg(short, long, global = true, env = "OMRAN_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config
    #[arg(short, long, global = true, env = "OMRAN_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bootstrap and print the system status
    Status,

    /// Process a single-line sale
    Sale {
        /// Item identifier
        #[arg(long)]
        item: String,

        /// Quantity sold
        #[arg(long)]
        qty: u32,

        /// Unit price
        #[arg(long)]
        price: f64,

        /// Customer name
        #[arg(long)]
        customer: Option<String>,
    },

    /// Apply a stock change
    Stock {
        /// Item identifier
        #[arg(long)]
        item: String,

        /// Signed quantity change
        #[arg(long, allow_hyphen_values = true)]
        delta: i64,
    },

    /// Generate a report (sales, inventory, low-stock, summary)
    Report {
        /// Report kind
        kind: ReportKind,
    },

    /// Run a data sync across all plugins
    Sync {
        /// Sync source label
        #[arg(long, default_value = "cli")]
        source: String,
    },

    /// Validate configuration file
    Validate,

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Version => {
            println!("Omran");
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!("Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
            Ok(())
        }

        Commands::Validate => {
            let path = cli
                .config
                .context("validate needs a configuration file (--config)")?;
            tracing_subscriber::fmt().with_target(false).init();

            tracing::info!("Validating configuration: {}", path.display());

            match load_config(&path) {
                Ok(cfg) => {
                    tracing::info!("✓ Configuration is valid");
                    tracing::info!("  App: {} ({})", cfg.app.name, cfg.app.locale);
                    tracing::info!("  Load order: {:?}", cfg.bootstrap.load_order);
                    tracing::info!("  Plugin settings: {}", cfg.plugins.len());
                    Ok(())
                }
                Err(e) => {
                    tracing::error!("✗ Configuration validation failed: {}", e);
                    std::process::exit(1);
                }
            }
        }

        command => {
            let config = match &cli.config {
                Some(path) => load_config(path)
                    .with_context(|| format!("failed to load {}", path.display()))?,
                None => AppConfig::default(),
            };

            let level = cli
                .log_level
                .clone()
                .unwrap_or_else(|| config.logging.level.clone());
            init_tracing(&level, config.logging.format)?;

            run(config, command).await
        }
    }
}

async fn run(config: AppConfig, command: Commands) -> Result<()> {
    tracing::info!(app = %config.app.name, "Starting Omran");

    let app = OmranApp::builder().config(config).build()?;
    app.bootstrap().await?;

    match command {
        Commands::Status => print_json(&app.get_system_status())?,

        Commands::Sale {
            item,
            qty,
            price,
            customer,
        } => {
            let mut sale = SaleRequest::single(item, qty, price);
            if let Some(customer) = customer {
                sale = sale.with_customer(customer);
            }
            print_json(&app.process_sale(&sale).await)?;
        }

        Commands::Stock { item, delta } => {
            let update = InventoryUpdate::new(item, delta).with_reason("cli");
            print_json(&app.update_inventory(&update).await)?;
        }

        Commands::Report { kind } => {
            print_json(&app.generate_report(&ReportRequest::new(kind)).await)?;
        }

        Commands::Sync { source } => {
            print_json(&app.sync_data(&SyncRequest::new(source)).await)?;
        }

        Commands::Validate | Commands::Version => {}
    }

    app.shutdown().await;
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn init_tracing(level: &str, format: LogFormat) -> Result<()> {
    let filter = match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    };

    let env_filter = EnvFilter::from_default_env().add_directive(filter.into());

    // Logs go to stderr so stdout stays machine-readable JSON
    match format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_level(true),
            )
            .with(env_filter)
            .try_init()?,
        LogFormat::Json => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .with(env_filter)
            .try_init()?,
    }

    Ok(())
}
