//! Mark command - change a parcel's pickup status.

use clap::{Args, ValueEnum};
use console::style;

use pickup_core::ParcelStatus;

use super::Context;

/// Arguments for the mark command.
#[derive(Args)]
pub struct MarkArgs {
    /// Pickup code, or position as shown by `list`
    selector: String,

    /// New status
    #[arg(value_enum)]
    status: StatusArg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    /// Waiting for pickup (待取件)
    Pending,
    /// Picked up (已取件)
    Collected,
}

impl From<StatusArg> for ParcelStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Pending => ParcelStatus::Pending,
            StatusArg::Collected => ParcelStatus::Collected,
        }
    }
}

pub async fn run(args: MarkArgs, ctx: &Context) -> anyhow::Result<()> {
    let record = ctx.open_book().mark(&args.selector, args.status.into())?;

    println!(
        "{} {} 状态已更新为：{}",
        style("✓").green(),
        record.label(),
        record.status
    );
    Ok(())
}
