//! Delimited-file sink.

use std::path::{Path, PathBuf};

use catalog_transform::CleanTable;

use crate::error::LoadError;
use crate::sink::{ensure_not_empty, SaveSummary};

#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    /// Creates a sink writing to `path`, appending `.csv` when the name
    /// does not already end with it.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: with_csv_extension(path.into()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes a header row followed by one row per record.
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// - [`LoadError::EmptyTable`]: nothing to write; no file is touched.
    /// - [`LoadError::Io`]: the directory or file cannot be created.
    /// - [`LoadError::Csv`]: a row cannot be serialized or flushed.
    pub fn try_save(&self, table: &CleanTable) -> Result<SaveSummary, LoadError> {
        ensure_not_empty(table)?;

        let io_err = |source| LoadError::Io {
            path: self.path.clone(),
            source,
        };
        let csv_err = |source| LoadError::Csv {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut writer = csv::Writer::from_path(&self.path).map_err(csv_err)?;
        for record in table {
            writer.serialize(record).map_err(csv_err)?;
        }
        writer.flush().map_err(io_err)?;

        Ok(SaveSummary {
            rows: table.len(),
            location: self.path.display().to_string(),
            cells_updated: None,
        })
    }
}

fn with_csv_extension(path: PathBuf) -> PathBuf {
    let has_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if has_csv {
        path
    } else {
        let mut name = path.into_os_string();
        name.push(".csv");
        PathBuf::from(name)
    }
}
