//! Delete command - remove one parcel.

use clap::Args;
use console::style;

use super::Context;

/// Arguments for the delete command.
#[derive(Args)]
pub struct DeleteArgs {
    /// Pickup code, or position as shown by `list`
    selector: String,
}

pub async fn run(args: DeleteArgs, ctx: &Context) -> anyhow::Result<()> {
    let removed = ctx.open_book().delete(&args.selector)?;

    println!("{} Deleted {}", style("✓").green(), removed.label());
    Ok(())
}
