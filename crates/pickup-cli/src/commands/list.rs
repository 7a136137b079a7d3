//! List command - show the stored parcel history.

use clap::Args;

use pickup_core::ParcelRecord;

use super::{Context, TIME_FORMAT};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text listing
    Text,
}

pub async fn run(args: ListArgs, ctx: &Context) -> anyhow::Result<()> {
    let records = ctx.open_book().records()?;

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&records)?,
        OutputFormat::Csv => format_csv(&records)?,
        OutputFormat::Text => format_text(&records),
    };

    println!("{}", output);
    Ok(())
}

fn format_csv(records: &[ParcelRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["carrier", "code", "address", "time", "status"])?;

    for record in records {
        wtr.write_record([
            record.carrier.as_str(),
            record.pickup_code.as_str(),
            record.address.as_str(),
            &record.received_at.format(TIME_FORMAT).to_string(),
            record.status.as_str(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(records: &[ParcelRecord]) -> String {
    if records.is_empty() {
        return "暂无快递记录".to_string();
    }

    records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            format!(
                "{}. {} 取件码:{} [{}]\n{}\n{}",
                i + 1,
                r.carrier,
                r.pickup_code,
                r.status,
                r.address,
                r.received_at.format(TIME_FORMAT)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> Vec<ParcelRecord> {
        let time = NaiveDate::from_ymd_opt(2025, 8, 19)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap();
        vec![ParcelRecord::new("顺丰", "9988", "菜鸟驿站", time)]
    }

    #[test]
    fn test_format_text() {
        assert_eq!(
            format_text(&sample()),
            "1. 顺丰 取件码:9988 [待取件]\n菜鸟驿站\n2025-08-19 09:05:00"
        );
        assert_eq!(format_text(&[]), "暂无快递记录");
    }

    #[test]
    fn test_format_csv() {
        let csv = format_csv(&sample()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("carrier,code,address,time,status"));
        assert_eq!(lines.next(), Some("顺丰,9988,菜鸟驿站,2025-08-19 09:05:00,待取件"));
    }
}
