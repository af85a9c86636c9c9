use clap::Args;

use super::{ConnectArgs, print_cart};

#[derive(Debug, Args)]
pub(crate) struct SyncArgs {
    #[command(flatten)]
    connect: ConnectArgs,
}

/// Reconcile the cart against the catalog immediately.
pub(crate) async fn run(args: SyncArgs) -> Result<(), String> {
    let ctx = args.connect.context().await;

    match ctx.engine.sync_now().await {
        Some(report) => {
            println!(
                "reconciled: {} refreshed, {} dropped, {} lookups failed",
                report.refreshed, report.dropped, report.failed
            );
        }
        None => println!("a reconciliation pass is already running"),
    }

    print_cart(&ctx.engine);

    Ok(())
}
