use clap::{Args, Subcommand};

use super::{ConnectArgs, print_cart};

#[derive(Debug, Args)]
pub(crate) struct PromoCommand {
    #[command(subcommand)]
    command: PromoSubcommand,
}

#[derive(Debug, Subcommand)]
enum PromoSubcommand {
    /// Validate a promo code against the current subtotal and attach it
    Apply(ApplyArgs),
    /// Detach the active promo code
    Remove(RemoveArgs),
}

pub(crate) async fn run(command: PromoCommand) -> Result<(), String> {
    match command.command {
        PromoSubcommand::Apply(args) => apply(args).await,
        PromoSubcommand::Remove(args) => remove(args).await,
    }
}

#[derive(Debug, Args)]
struct ApplyArgs {
    /// The promo code to apply
    code: String,

    #[command(flatten)]
    connect: ConnectArgs,
}

async fn apply(args: ApplyArgs) -> Result<(), String> {
    let ctx = args.connect.context().await;

    let applied = ctx
        .engine
        .apply_promo_code(&args.code)
        .await
        .map_err(|error| error.to_string())?;

    println!("applied {} (-{})", applied.code(), applied.amount());
    print_cart(&ctx.engine);

    Ok(())
}

#[derive(Debug, Args)]
struct RemoveArgs {
    #[command(flatten)]
    connect: ConnectArgs,
}

async fn remove(args: RemoveArgs) -> Result<(), String> {
    let ctx = args.connect.context().await;

    ctx.engine.remove_promo_code();

    print_cart(&ctx.engine);

    Ok(())
}
