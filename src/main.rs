use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use datastore::Dataset;
use ingest::{normalize, read_raw_table, NormalizerOptions};
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// The main entry point for the Fundscope application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment overrides (e.g. RUST_LOG) from a .env file if present.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            let settings = configuration::load_settings(config.as_deref())
                .context("Failed to load configuration")?;
            web_server::run_server(settings).await
        }
        Commands::Inspect { file, config } => {
            let settings = configuration::load_settings(config.as_deref())
                .context("Failed to load configuration")?;
            handle_inspect(file, settings)
        }
    }
}

/// Fund performance and risk analytics over uploaded fund exports.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server.
    Serve {
        /// Path to the configuration file (defaults to ./config.toml).
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Normalize a fund export offline and print what would be ingested.
    Inspect {
        /// The export file to normalize.
        file: PathBuf,

        /// Path to the configuration file (defaults to ./config.toml).
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Parses the export exactly like the upload endpoint would and prints the
/// fund table plus the dataset summary.
fn handle_inspect(path: PathBuf, settings: configuration::Settings) -> anyhow::Result<()> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let table = read_raw_table(file, settings.source.preamble_rows)?;
    let options = NormalizerOptions {
        name_column: settings.source.name_column.clone(),
        sentinel: settings.source.sentinel.clone(),
        date_format: settings.source.date_format.clone(),
    };
    let (funds, observations) = normalize(&table, &options)?;
    let dataset = Dataset::build(funds, observations);

    let mut fund_table = Table::new();
    fund_table.load_preset(UTF8_FULL).set_header(vec![
        "ID",
        "Fund",
        "Category",
        "Sector",
        "Observations",
    ]);
    for fund in dataset.funds() {
        let observations = dataset
            .returns_for_fund(fund.fund_id, None, None)
            .map(|series| series.len())
            .unwrap_or(0);
        fund_table.add_row(vec![
            fund.fund_id.to_string(),
            fund.fund_name.clone(),
            fund.category.clone().unwrap_or_default(),
            fund.sector.clone().unwrap_or_default(),
            observations.to_string(),
        ]);
    }
    println!("{fund_table}");
    println!("{}", serde_json::to_string_pretty(&dataset.summary())?);

    Ok(())
}
