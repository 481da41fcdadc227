//! Command handlers: the full pipeline and its two halves.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use catalog_core::AppConfig;
use catalog_db::PoolConfig;
use catalog_load::{save_all, CsvSink, PostgresSink, SheetsSink, Sink};
use catalog_scraper::{crawl, CatalogClient, ClientSettings, CrawlOptions, CrawlReport};
use catalog_transform::{Clean, Cleaner};

async fn crawl_catalog(config: &AppConfig) -> anyhow::Result<CrawlReport> {
    let client = CatalogClient::new(&ClientSettings::from_app_config(config))?;
    let options = CrawlOptions::new(&config.base_url, config.max_pages)
        .with_page_delay(Duration::from_millis(config.page_delay_ms));

    let report = crawl(&client, &options).await;
    if !report.stop_reason.is_complete() {
        tracing::warn!(stop_reason = ?report.stop_reason, "crawl ended early; keeping partial results");
    }
    Ok(report)
}

/// Sinks enabled by `config`, in the order they run.
pub(crate) fn configured_sinks(config: &AppConfig, csv_enabled: bool) -> Vec<Sink> {
    let mut sinks = Vec::new();
    if csv_enabled {
        sinks.push(Sink::Csv(CsvSink::new(&config.csv_path)));
    }
    if let Some(url) = &config.database_url {
        sinks.push(Sink::Postgres(PostgresSink::new(
            url.as_str(),
            config.db_table.as_str(),
            PoolConfig::from_app_config(config),
        )));
    }
    if let Some(id) = &config.sheets_spreadsheet_id {
        sinks.push(Sink::Sheets(SheetsSink::new(
            id.as_str(),
            &config.sheets_credentials_path,
        )));
    }
    sinks
}

/// Scrape → clean → save to every configured sink.
///
/// # Errors
///
/// Fails when nothing was scraped or cleaning rejects the table. Sink
/// failures are reported but do not fail the run.
pub(crate) async fn run(config: &AppConfig, csv_enabled: bool) -> anyhow::Result<()> {
    let report = crawl_catalog(config).await?;
    if report.records.is_empty() {
        anyhow::bail!("no products scraped from {}", config.base_url);
    }

    let cleaner = Cleaner::with_exchange_rate(config.exchange_rate);
    let table = report.records.clean_with(&cleaner)?;
    println!(
        "scraped {} records from {} pages; {} rows after cleaning",
        report.records.len(),
        report.pages_fetched,
        table.len()
    );

    let sinks = configured_sinks(config, csv_enabled);
    if sinks.is_empty() {
        println!("no sinks configured; nothing saved");
        return Ok(());
    }

    let outcomes = save_all(&sinks, &table).await;
    for outcome in &outcomes {
        let status = if outcome.succeeded { "ok" } else { "FAILED" };
        println!("  {:<10} {status}", outcome.sink);
    }
    let failed = outcomes.iter().filter(|o| !o.succeeded).count();
    if failed > 0 {
        tracing::warn!(failed, total = outcomes.len(), "some sinks failed");
    }
    Ok(())
}

/// Writes the raw scraped records as pretty JSON to `output` or stdout.
///
/// # Errors
///
/// Fails when the client cannot be built or the output cannot be written.
pub(crate) async fn scrape_to_json(config: &AppConfig, output: Option<&Path>) -> anyhow::Result<()> {
    let report = crawl_catalog(config).await?;
    let json = serde_json::to_string_pretty(&report.records)?;

    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("wrote {} records to {}", report.records.len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Reads raw records from a JSON file, cleans them and writes a CSV.
///
/// # Errors
///
/// Fails when the input is unreadable or not a product table, or when the
/// CSV cannot be written.
pub(crate) fn clean_file(config: &AppConfig, input: &Path, csv: &Path) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", input.display()))?;

    let cleaner = Cleaner::with_exchange_rate(config.exchange_rate);
    let table = value.clean_with(&cleaner)?;

    let summary = CsvSink::new(csv).try_save(&table)?;
    println!("wrote {} rows to {}", summary.rows, summary.location);
    Ok(())
}
