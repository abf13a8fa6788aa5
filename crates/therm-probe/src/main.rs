//! thermprobe - Thermolog probe agent
//!
//! This binary runs next to the sensor, reads the temperature on a fixed
//! interval, and pushes each reading to a Thermolog server.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use therm_client::ApiClient;
use therm_probe::ProbeConfig;
use therm_probe::sensor::{create_sensor, round_to_hundredths};
use therm_proto::NewReading;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "thermprobe")]
#[command(about = "Thermolog probe agent")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the probe agent
    Run {
        /// Path to config file
        #[arg(short, long, default_value = "/etc/thermprobe/config.toml")]
        config: PathBuf,
    },

    /// Take a single reading and print it without pushing
    Read {
        /// Path to config file
        #[arg(short, long, default_value = "/etc/thermprobe/config.toml")]
        config: PathBuf,
    },

    /// Generate a sample config file
    InitConfig {
        /// Path to write config
        #[arg(short, long, default_value = "/etc/thermprobe/config.toml")]
        output: PathBuf,

        /// Server endpoint
        #[arg(long, default_value = "http://127.0.0.1:3000")]
        endpoint: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("thermprobe=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config } => {
            run_probe(config).await?;
        }

        Commands::Read { config } => {
            read_once(config)?;
        }

        Commands::InitConfig { output, endpoint } => {
            init_config(output, endpoint)?;
        }
    }

    Ok(())
}

async fn run_probe(config_path: PathBuf) -> anyhow::Result<()> {
    info!(config = %config_path.display(), "starting thermprobe");

    let config = ProbeConfig::from_file(&config_path)?;
    info!(
        endpoint = %config.endpoint,
        device_id = %config.device_id,
        interval_secs = config.interval_secs,
        "loaded config"
    );

    let mut sensor = create_sensor(&config.sensor)?;
    info!(sensor = sensor.name(), "sensor ready");

    let client = ApiClient::new(&config.endpoint);
    let mut ticker = tokio::time::interval(Duration::from_secs(config.interval_secs));

    loop {
        ticker.tick().await;

        let celsius = match sensor.read_celsius() {
            Ok(value) => round_to_hundredths(value),
            Err(e) => {
                warn!(error = %e, "sensor read failed, skipping cycle");
                continue;
            }
        };

        // A failed push is dropped; the next cycle takes a fresh reading.
        let reading = NewReading::new(celsius).with_device_id(config.device_id.clone());
        match client.insert(&reading).await {
            Ok(id) => {
                debug!(id = id.as_i64(), temperature = celsius, "pushed reading");
            }
            Err(e) => {
                warn!(error = %e, temperature = celsius, "push failed, reading dropped");
            }
        }
    }
}

fn read_once(config_path: PathBuf) -> anyhow::Result<()> {
    let config = ProbeConfig::from_file(&config_path)?;
    let mut sensor = create_sensor(&config.sensor)?;

    let celsius = round_to_hundredths(sensor.read_celsius()?);
    println!(
        "{} {:.2}°C ({:.2}°F)",
        sensor.name(),
        celsius,
        celsius * 9.0 / 5.0 + 32.0
    );

    Ok(())
}

fn init_config(output: PathBuf, endpoint: String) -> anyhow::Result<()> {
    let config = ProbeConfig {
        endpoint,
        ..ProbeConfig::default()
    };
    config.validate()?;
    config.save(&output)?;

    println!("Config written to {}", output.display());
    println!();
    println!("Edit the file to pick a sensor backend and device id, then run:");
    println!("  thermprobe run --config {}", output.display());

    Ok(())
}
