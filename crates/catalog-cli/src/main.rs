mod etl;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "catalog-cli")]
#[command(about = "Scrape the fashion catalog, clean it and save it")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape, clean and save to every configured sink
    Run {
        /// Listing start URL (overrides CATALOG_BASE_URL)
        #[arg(long)]
        base_url: Option<String>,

        /// Maximum number of listing pages to fetch
        #[arg(long)]
        max_pages: Option<usize>,

        /// CSV destination (overrides CATALOG_CSV_PATH)
        #[arg(long, conflicts_with = "no_csv")]
        csv: Option<PathBuf>,

        /// Skip the CSV sink
        #[arg(long)]
        no_csv: bool,

        /// Postgres table name (overrides CATALOG_DB_TABLE)
        #[arg(long)]
        table: Option<String>,

        /// Spreadsheet to write (enables the Sheets sink)
        #[arg(long)]
        spreadsheet_id: Option<String>,

        /// Service-account key file for the Sheets sink
        #[arg(long)]
        credentials: Option<PathBuf>,
    },
    /// Scrape and dump the raw records as JSON
    Scrape {
        #[arg(long)]
        base_url: Option<String>,

        #[arg(long)]
        max_pages: Option<usize>,

        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Clean a JSON file of raw records into a CSV file
    Clean {
        #[arg(long)]
        input: PathBuf,

        /// Defaults to CATALOG_CSV_PATH
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = catalog_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .finish();
    let _log_guard = tracing::subscriber::set_default(subscriber);

    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Run {
            base_url,
            max_pages,
            csv,
            no_csv,
            table,
            spreadsheet_id,
            credentials,
        } => {
            apply_crawl_overrides(&mut config, base_url, max_pages);
            if let Some(path) = csv {
                config.csv_path = path;
            }
            if let Some(table) = table {
                config.db_table = table;
            }
            if spreadsheet_id.is_some() {
                config.sheets_spreadsheet_id = spreadsheet_id;
            }
            if let Some(path) = credentials {
                config.sheets_credentials_path = path;
            }
            etl::run(&config, !no_csv).await
        }
        Commands::Scrape {
            base_url,
            max_pages,
            output,
        } => {
            apply_crawl_overrides(&mut config, base_url, max_pages);
            etl::scrape_to_json(&config, output.as_deref()).await
        }
        Commands::Clean { input, csv } => {
            let csv = csv.unwrap_or_else(|| config.csv_path.clone());
            etl::clean_file(&config, &input, &csv)
        }
    }
}

fn apply_crawl_overrides(
    config: &mut catalog_core::AppConfig,
    base_url: Option<String>,
    max_pages: Option<usize>,
) {
    if let Some(url) = base_url {
        config.base_url = url;
    }
    if let Some(n) = max_pages {
        config.max_pages = n;
    }
}
