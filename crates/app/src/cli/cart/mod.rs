use clap::{Args, Subcommand};
use treadline::products::ProductId;
use treadline_app::{
    catalog::{CatalogClient, HttpCatalogClient},
    config::ApiConfig,
};

use super::{ConnectArgs, print_cart};

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Add units of a catalog product to the cart
    Add(AddArgs),
    /// Remove a product from the cart
    Remove(RemoveArgs),
    /// Set the quantity of a product already in the cart (0 removes it)
    Quantity(QuantityArgs),
    /// Print the cart lines and totals
    Show(ShowArgs),
    /// Empty the cart
    Clear(ClearArgs),
}

pub(crate) async fn run(command: CartCommand) -> Result<(), String> {
    match command.command {
        CartSubcommand::Add(args) => add(args).await,
        CartSubcommand::Remove(args) => remove(args).await,
        CartSubcommand::Quantity(args) => quantity(args).await,
        CartSubcommand::Show(args) => show(args).await,
        CartSubcommand::Clear(args) => clear(args).await,
    }
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Catalog id of the product to add
    #[arg(long)]
    product_id: u64,

    /// Number of units to add
    #[arg(long, default_value = "1")]
    quantity: u32,

    #[command(flatten)]
    connect: ConnectArgs,
}

async fn add(args: AddArgs) -> Result<(), String> {
    let id = ProductId::new(args.product_id);

    // fetch the catalog snapshot the new line will carry
    let catalog = HttpCatalogClient::new(ApiConfig::new(&args.connect.api_url));
    let snapshot = catalog
        .get_product(id)
        .await
        .map_err(|error| format!("failed to fetch product {id}: {error}"))?;

    let ctx = args.connect.context().await;
    ctx.engine.add_item(id, snapshot, args.quantity).await;

    print_cart(&ctx.engine);

    Ok(())
}

#[derive(Debug, Args)]
struct RemoveArgs {
    /// Catalog id of the product to remove
    #[arg(long)]
    product_id: u64,

    #[command(flatten)]
    connect: ConnectArgs,
}

async fn remove(args: RemoveArgs) -> Result<(), String> {
    let ctx = args.connect.context().await;

    ctx.engine.remove_item(ProductId::new(args.product_id)).await;

    print_cart(&ctx.engine);

    Ok(())
}

#[derive(Debug, Args)]
struct QuantityArgs {
    /// Catalog id of the product to update
    #[arg(long)]
    product_id: u64,

    /// New quantity; 0 removes the line
    #[arg(long)]
    quantity: u32,

    #[command(flatten)]
    connect: ConnectArgs,
}

async fn quantity(args: QuantityArgs) -> Result<(), String> {
    let ctx = args.connect.context().await;

    ctx.engine
        .set_quantity(ProductId::new(args.product_id), args.quantity)
        .await;

    print_cart(&ctx.engine);

    Ok(())
}

#[derive(Debug, Args)]
struct ShowArgs {
    #[command(flatten)]
    connect: ConnectArgs,
}

async fn show(args: ShowArgs) -> Result<(), String> {
    let ctx = args.connect.context().await;

    print_cart(&ctx.engine);

    Ok(())
}

#[derive(Debug, Args)]
struct ClearArgs {
    #[command(flatten)]
    connect: ConnectArgs,
}

async fn clear(args: ClearArgs) -> Result<(), String> {
    let ctx = args.connect.context().await;

    ctx.engine.clear().await;

    println!("cart cleared");

    Ok(())
}
