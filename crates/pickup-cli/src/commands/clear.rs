//! Clear command - remove every parcel.

use clap::Args;
use console::style;

use super::Context;

/// Arguments for the clear command.
#[derive(Args)]
pub struct ClearArgs {
    /// Confirm deleting all parcels
    #[arg(short, long)]
    yes: bool,
}

pub async fn run(args: ClearArgs, ctx: &Context) -> anyhow::Result<()> {
    let book = ctx.open_book();

    if !args.yes {
        let count = book.records()?.len();
        anyhow::bail!("Refusing to delete {} parcels without --yes", count);
    }

    let count = book.clear()?;
    println!("{} Cleared {} parcels", style("✓").green(), count);
    Ok(())
}
