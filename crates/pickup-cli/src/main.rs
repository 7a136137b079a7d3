//! CLI application for tracking parcel pickup notifications.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use commands::{add, clear, config, delete, list, mark, summary, Context};

/// Parcel pickup tracker - Turn delivery notifications into a pickup list
#[derive(Parser)]
#[command(name = "pickup")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the parcel data file (overrides config)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import notification messages (separated by new lines or ';')
    Add(add::AddArgs),

    /// Show all stored parcels
    List(list::ListArgs),

    /// Delete a parcel
    Delete(delete::DeleteArgs),

    /// Delete all parcels
    Clear(clear::ClearArgs),

    /// Mark a parcel as pending or collected
    Mark(mark::MarkArgs),

    /// Show the newest pending parcels
    Summary(summary::SummaryArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity, RUST_LOG takes precedence
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let builder = FmtSubscriber::builder()
        .with_target(false)
        .with_writer(std::io::stderr);

    match EnvFilter::try_from_default_env() {
        Ok(filter) => {
            tracing::subscriber::set_global_default(builder.with_env_filter(filter).finish())?
        }
        Err(_) => tracing::subscriber::set_global_default(builder.with_max_level(level).finish())?,
    }

    let context = || Context::load(cli.config.as_deref(), cli.data.clone());

    // Execute command
    match cli.command {
        Commands::Add(args) => add::run(args, &context()?).await,
        Commands::List(args) => list::run(args, &context()?).await,
        Commands::Delete(args) => delete::run(args, &context()?).await,
        Commands::Clear(args) => clear::run(args, &context()?).await,
        Commands::Mark(args) => mark::run(args, &context()?).await,
        Commands::Summary(args) => summary::run(args, &context()?).await,
        Commands::Config(args) => config::run(args, cli.config.as_deref()).await,
    }
}
