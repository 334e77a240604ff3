use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use vehicle_rental::{default_fleet, Fleet, Menu, RentalConfig};

#[derive(Parser, Debug)]
#[command(name = "vehicle-rental", version, about = "Interactive vehicle rental desk")]
struct Cli {
    #[arg(long, help = "JSON fleet file to seed vehicles from (defaults to the built-in fleet)")]
    fleet: Option<PathBuf>,

    #[arg(long, default_value = "₹", help = "Currency symbol used when printing prices")]
    currency: String,

    #[arg(long, short, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with the menu on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("vehicle_rental={}", cli.log_level))),
        )
        .with_writer(io::stderr)
        .init();

    let config = RentalConfig {
        currency_symbol: cli.currency,
        ..RentalConfig::default()
    };

    let fleet = match &cli.fleet {
        Some(path) => Fleet::load(path)
            .with_context(|| format!("failed to load fleet from {}", path.display()))?,
        None => Fleet::from(default_fleet()),
    };
    let mut service = fleet
        .into_service(config)
        .context("failed to register fleet")?;
    tracing::info!(vehicles = service.vehicles().len(), "rental desk ready");

    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(&mut service, stdin.lock(), stdout.lock()).run()?;
    Ok(())
}
