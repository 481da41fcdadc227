//! Dispatch over the configured sinks.
//!
//! Every sink has the same contract: refuse an empty table before doing
//! any I/O, never propagate a failure past [`Sink::save`], and log one
//! message per failure category.

use catalog_transform::CleanTable;

use crate::csv_file::CsvSink;
use crate::error::LoadError;
use crate::postgres::PostgresSink;
use crate::sheets::SheetsSink;

/// What a successful save wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSummary {
    pub rows: usize,
    /// File path, table name or spreadsheet id.
    pub location: String,
    /// Reported by the spreadsheet API only.
    pub cells_updated: Option<u64>,
}

pub enum Sink {
    Csv(CsvSink),
    Postgres(PostgresSink),
    Sheets(SheetsSink),
}

impl Sink {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Sink::Csv(_) => "csv",
            Sink::Postgres(_) => "postgres",
            Sink::Sheets(_) => "sheets",
        }
    }

    /// Writes `table`, returning the typed failure.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::EmptyTable`] for an empty table, otherwise
    /// whatever the concrete sink reports.
    pub async fn try_save(&self, table: &CleanTable) -> Result<SaveSummary, LoadError> {
        match self {
            Sink::Csv(sink) => sink.try_save(table),
            Sink::Postgres(sink) => sink.try_save(table).await,
            Sink::Sheets(sink) => sink.try_save(table).await,
        }
    }

    /// Writes `table` and reports success as a boolean. Failures are logged.
    pub async fn save(&self, table: &CleanTable) -> bool {
        match self.try_save(table).await {
            Ok(summary) => {
                tracing::info!(
                    sink = self.name(),
                    location = %summary.location,
                    rows = summary.rows,
                    cells_updated = ?summary.cells_updated,
                    "data saved"
                );
                true
            }
            Err(err) => {
                log_failure(self.name(), &err);
                false
            }
        }
    }
}

fn log_failure(sink: &'static str, err: &LoadError) {
    match err {
        LoadError::EmptyTable => tracing::warn!(sink, "no data to save"),
        LoadError::Io { path, .. } => {
            tracing::error!(sink, path = %path.display(), error = %err, "file system error");
        }
        LoadError::Csv { path, .. } => {
            tracing::error!(sink, path = %path.display(), error = %err, "error saving to CSV");
        }
        LoadError::Db(_) => tracing::error!(sink, error = %err, "database error"),
        LoadError::CredentialsNotFound { path } => {
            tracing::error!(sink, path = %path.display(), "credentials file not found");
        }
        LoadError::Credentials { .. } | LoadError::Token(_) => {
            tracing::error!(sink, error = %err, "authentication error");
        }
        LoadError::SheetsApi { .. } | LoadError::Http(_) => {
            tracing::error!(sink, error = %err, "error saving to Google Sheets");
        }
    }
}

/// Result of one sink in a [`save_all`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkOutcome {
    pub sink: &'static str,
    pub succeeded: bool,
}

/// Runs every sink in order. A failing sink does not stop the others.
pub async fn save_all(sinks: &[Sink], table: &CleanTable) -> Vec<SinkOutcome> {
    let mut outcomes = Vec::with_capacity(sinks.len());
    for sink in sinks {
        let succeeded = sink.save(table).await;
        outcomes.push(SinkOutcome {
            sink: sink.name(),
            succeeded,
        });
    }
    outcomes
}

pub(crate) fn ensure_not_empty(table: &CleanTable) -> Result<(), LoadError> {
    if table.is_empty() {
        Err(LoadError::EmptyTable)
    } else {
        Ok(())
    }
}
