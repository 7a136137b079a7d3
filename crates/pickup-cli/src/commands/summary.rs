//! Summary command - the newest pending parcels at a glance.

use chrono::NaiveDateTime;
use clap::Args;

use pickup_core::message::now;
use pickup_core::Summary;

use super::Context;

/// Arguments for the summary command.
#[derive(Args)]
pub struct SummaryArgs {
    /// Maximum number of parcels to show (default from config)
    #[arg(short, long)]
    max: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: SummaryFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum SummaryFormat {
    /// JSON output
    Json,
    /// Plain text panel
    Text,
}

pub async fn run(args: SummaryArgs, ctx: &Context) -> anyhow::Result<()> {
    let max_show = args.max.unwrap_or(ctx.config.display.max_show);
    let summary = ctx.open_book().summary(max_show)?;

    let output = match args.format {
        SummaryFormat::Json => serde_json::to_string_pretty(&summary)?,
        SummaryFormat::Text => format_text(&summary, &ctx.config.display.empty_message, now()),
    };

    println!("{}", output);
    Ok(())
}

fn format_text(summary: &Summary, empty_message: &str, updated_at: NaiveDateTime) -> String {
    if summary.is_empty() {
        return empty_message.to_string();
    }

    let mut output = String::new();

    output.push_str(&format!(
        "📦 Express  已到达 {} 个  请及时取件！\n",
        summary.pending_count
    ));
    output.push_str(&format!("上次更新：{}\n", updated_at.format("%m/%d %H:%M")));

    for entry in &summary.entries {
        output.push_str("────────────────────────\n");
        output.push_str(&format!(
            "{}  取件码: {}  {}\n",
            entry.carrier, entry.code, entry.status
        ));
        output.push_str(&format!(
            "  {}  时间 {}\n",
            entry.address,
            entry.received_at.format("%H:%M")
        ));
    }

    output.trim_end().to_string()
}
