//! Treadline cart CLI.
//!
//! Drives a locally persisted cart against a configured storefront API:
//! add and remove products, apply promo codes, reconcile against the
//! catalog, and inspect totals.

use std::process;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = cli::Cli::parse();

    if let Err(message) = cli.run().await {
        error!("{message}");
        process::exit(1);
    }
}
