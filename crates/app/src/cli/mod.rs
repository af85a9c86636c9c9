use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use treadline_app::{
    config::{ApiConfig, EngineConfig},
    context::ClientContext,
    engine::CartEngine,
};

mod cart;
mod promo;
mod sync;

#[derive(Debug, Parser)]
#[command(name = "treadline-app", about = "Treadline cart CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Cart(cart::CartCommand),
    Promo(promo::PromoCommand),
    Sync(sync::SyncArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Cart(command) => cart::run(command).await,
            Commands::Promo(command) => promo::run(command).await,
            Commands::Sync(args) => sync::run(args).await,
        }
    }
}

/// Connection settings shared by every subcommand.
#[derive(Debug, Args)]
pub(crate) struct ConnectArgs {
    /// Storefront API base URL
    #[arg(long, env = "API_URL")]
    pub(crate) api_url: String,

    /// Directory the cart blob is persisted in
    #[arg(long, env = "CART_DIR", default_value = ".treadline")]
    pub(crate) cart_dir: PathBuf,
}

impl ConnectArgs {
    pub(crate) async fn context(&self) -> ClientContext {
        ClientContext::from_api(
            ApiConfig::new(&self.api_url),
            &self.cart_dir,
            EngineConfig::default(),
        )
        .await
    }
}

/// Print the cart lines and totals of the given engine.
pub(crate) fn print_cart(engine: &CartEngine) {
    let lines = engine.lines();

    if lines.is_empty() {
        println!("cart is empty");
        return;
    }

    for line in &lines {
        let snapshot = line.snapshot();
        let label = if snapshot.brand.is_empty() {
            snapshot.name.clone()
        } else {
            format!("{} {}", snapshot.brand, snapshot.name)
        };

        println!(
            "{:>3} x {label} @ {} = {} (product {})",
            line.quantity(),
            line.unit_price(),
            line.line_total(),
            line.product_id(),
        );
    }

    let totals = engine.totals();

    println!("subtotal: {}", totals.subtotal());

    if let Some(code) = engine.promo_code() {
        println!("promo {code}: -{}", totals.discount());
    }

    println!("total: {}", totals.total());
}
