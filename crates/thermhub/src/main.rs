//! thermhub - Thermolog hub server
//!
//! Long-running service that ingests temperature readings over HTTP,
//! stores them in SQLite and serves the web dashboard.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use therm_dashboard::DashboardServer;
use therm_store::ReadingStore;
use thermhub::{DatabaseConfig, HubConfig, ServerConfig};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "thermhub")]
#[command(about = "Thermolog Hub - temperature ingest and dashboard server")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the hub server
    Run {
        /// Path to config file
        #[arg(short, long, default_value = "/etc/thermhub/config.toml")]
        config: PathBuf,
    },

    /// Generate a sample config file
    InitConfig {
        /// Path to write the config to
        #[arg(short, long, default_value = "config.toml")]
        output: PathBuf,

        /// Address the HTTP server listens on
        #[arg(long, default_value = "0.0.0.0:3000")]
        bind: String,

        /// Path of the SQLite database file
        #[arg(long, default_value = "thermolog.db")]
        database: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("thermhub=info".parse()?))
        .init();

    match cli.command {
        Commands::Run { config } => run_hub(config).await?,
        Commands::InitConfig {
            output,
            bind,
            database,
        } => init_config(output, bind, database)?,
    }

    Ok(())
}

async fn run_hub(config_path: PathBuf) -> anyhow::Result<()> {
    let config = HubConfig::from_file(&config_path)?;
    info!(path = %config_path.display(), "Loaded configuration");

    let store = Arc::new(ReadingStore::open(&config.database.path)?);
    info!(
        path = %config.database.path,
        readings = store.count_all()?,
        "Opened reading store"
    );

    let addr = config.bind_addr()?;
    let server = DashboardServer::new(config.dashboard_config()?, store);

    server.serve_with_shutdown(addr, shutdown_signal()).await?;
    info!("Hub stopped");

    Ok(())
}

/// Resolves when the process receives SIGINT.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received SIGINT, initiating shutdown"),
        Err(e) => {
            // Without a signal handler the server cannot be asked to
            // stop gracefully; keep serving instead of exiting.
            error!(error = %e, "failed to install shutdown handler");
            std::future::pending::<()>().await;
        }
    }
}

fn init_config(output: PathBuf, bind: String, database: String) -> anyhow::Result<()> {
    let config = HubConfig {
        server: ServerConfig {
            bind_addr: bind,
            ..ServerConfig::default()
        },
        database: DatabaseConfig { path: database },
    };
    config.validate()?;
    config.save(&output)?;

    println!("Config written to {}", output.display());
    println!();
    println!("Start the hub with:");
    println!("  thermhub run --config {}", output.display());

    Ok(())
}
