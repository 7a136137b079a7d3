//! Add command - import notification messages.

use clap::Args;
use console::style;
use tokio::io::AsyncReadExt;
use tracing::debug;

use pickup_core::PickupError;

use super::Context;

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Notification messages; read from stdin when omitted
    messages: Vec<String>,
}

pub async fn run(args: AddArgs, ctx: &Context) -> anyhow::Result<()> {
    let input = if args.messages.is_empty() {
        let mut buf = String::new();
        tokio::io::stdin().read_to_string(&mut buf).await?;
        buf
    } else {
        args.messages.join("\n")
    };

    debug!("Batch input: {} bytes", input.len());

    let book = ctx.open_book();
    let result = match book.add_batch(&input) {
        Ok(result) => result,
        Err(PickupError::EmptyInput) => anyhow::bail!("输入为空，导入已取消"),
        Err(PickupError::NoValidMessages) => anyhow::bail!("没有合法快递信息，导入已取消"),
        Err(e) => return Err(e.into()),
    };

    println!("{}", result.notice());

    if result.updated > 0 || result.skipped > 0 {
        println!(
            "{} {} updated, {} skipped",
            style("ℹ").blue(),
            result.updated,
            result.skipped
        );
    }

    Ok(())
}
