//! The cleaning pipeline.
//!
//! Stages run in a fixed order, each consuming the previous stage's rows:
//!
//! 1. drop exact duplicate rows (first occurrence wins),
//! 2. drop rows hitting a [`DirtyPatterns`] sentinel,
//! 3. drop rows with any null,
//! 4. coerce `Price`, `Rating` and `Colors`, converting the price currency,
//! 5. drop rows where a coercion failed.
//!
//! Surviving rows keep their input order and are re-indexed from zero.

use std::collections::HashSet;

use catalog_core::{CleanProductRecord, Column, RawProductRecord};
use serde_json::Value;

use crate::coerce::{parse_colors, parse_price, parse_rating};
use crate::error::CleanError;
use crate::rules::DirtyPatterns;
use crate::table::{CleanTable, RawTable};

/// Source-to-target currency multiplier.
pub const DEFAULT_EXCHANGE_RATE: f64 = 16_000.0;

/// Cleaning parameters: the currency rate and the sentinel table.
#[derive(Debug, Clone)]
pub struct Cleaner {
    pub exchange_rate: f64,
    pub dirty_patterns: DirtyPatterns,
}

impl Default for Cleaner {
    fn default() -> Self {
        Self {
            exchange_rate: DEFAULT_EXCHANGE_RATE,
            dirty_patterns: DirtyPatterns::default(),
        }
    }
}

impl Cleaner {
    #[must_use]
    pub fn with_exchange_rate(exchange_rate: f64) -> Self {
        Self {
            exchange_rate,
            ..Self::default()
        }
    }

    /// Runs the full pipeline over raw rows.
    ///
    /// # Errors
    ///
    /// Returns [`CleanError::Stage`] if a row reaches the typed stage with a
    /// null that the purge should have removed.
    pub fn clean_records(&self, rows: &[RawProductRecord]) -> Result<CleanTable, CleanError> {
        let input = rows.len();

        let unique = dedupe(rows.iter(), |r| r);
        tracing::debug!(stage = "dedupe", rows_in = input, rows_out = unique.len(), "stage done");

        let filtered: Vec<&RawProductRecord> = unique
            .into_iter()
            .filter(|record| match self.dirty_patterns.first_match(record) {
                Some(column) => {
                    tracing::debug!(title = ?record.title, column = %column, "dropping sentinel row");
                    false
                }
                None => true,
            })
            .collect();
        tracing::debug!(stage = "sentinels", rows_out = filtered.len(), "stage done");

        let complete: Vec<&RawProductRecord> =
            filtered.into_iter().filter(|r| !r.has_null()).collect();
        tracing::debug!(stage = "null_purge", rows_out = complete.len(), "stage done");

        let mut cleaned = Vec::with_capacity(complete.len());
        for (index, record) in complete.into_iter().enumerate() {
            match self.coerce(record).map_err(|err| {
                tracing::error!(stage = "coerce", row = index, error = %err, "cleaning failed");
                err
            })? {
                Some(row) => cleaned.push(row),
                None => {
                    tracing::debug!(row = index, title = ?record.title, "dropping row after failed coercion");
                }
            }
        }
        tracing::debug!(stage = "coerce", rows_out = cleaned.len(), "stage done");
        tracing::info!(rows_in = input, rows_out = cleaned.len(), "cleaning complete");

        Ok(CleanTable::new(cleaned))
    }

    /// Re-applies the row filters to an already clean table.
    ///
    /// Values are not coerced again, so prices are not converted twice.
    #[must_use]
    pub fn clean_table(&self, table: &CleanTable) -> CleanTable {
        let rows = dedupe(table.iter(), CleanProductRecord::row_key)
            .into_iter()
            .filter(|row| row.is_finite())
            .filter(|row| {
                [
                    (Column::Title, &row.title),
                    (Column::Size, &row.size),
                    (Column::Gender, &row.gender),
                    (Column::Timestamp, &row.timestamp),
                ]
                .into_iter()
                .all(|(column, value)| !self.dirty_patterns.rejects(column, Some(value.as_str())))
            })
            .cloned()
            .collect();
        CleanTable::new(rows)
    }

    /// Coerces one null-free row. `Ok(None)` means a value failed to coerce.
    fn coerce(&self, record: &RawProductRecord) -> Result<Option<CleanProductRecord>, CleanError> {
        let text = |column: Column| required(record, column);

        let price = parse_price(text(Column::Price)?, self.exchange_rate);
        let rating = parse_rating(text(Column::Rating)?);
        let colors = parse_colors(text(Column::Colors)?);

        let (Some(price), Some(rating), Some(colors)) = (price, rating, colors) else {
            return Ok(None);
        };

        Ok(Some(CleanProductRecord {
            title: text(Column::Title)?.to_owned(),
            price,
            rating,
            colors,
            size: text(Column::Size)?.to_owned(),
            gender: text(Column::Gender)?.to_owned(),
            timestamp: text(Column::Timestamp)?.to_owned(),
        }))
    }
}

fn required(record: &RawProductRecord, column: Column) -> Result<&str, CleanError> {
    record.get(column).ok_or_else(|| CleanError::Stage {
        stage: "coerce",
        reason: format!("column {column} is null after the null purge"),
    })
}

/// Keeps the first occurrence of each key, preserving order.
fn dedupe<'a, T, K, I, F>(rows: I, key: F) -> Vec<&'a T>
where
    I: Iterator<Item = &'a T>,
    K: Eq + std::hash::Hash,
    F: Fn(&'a T) -> K,
    T: 'a,
{
    let mut seen = HashSet::new();
    rows.filter(|row| seen.insert(key(*row))).collect()
}

/// Something the cleaner can turn into a [`CleanTable`].
pub trait Clean {
    /// # Errors
    ///
    /// Returns [`CleanError`] when the input is not a product table or a
    /// stage fails unexpectedly.
    fn clean_with(&self, cleaner: &Cleaner) -> Result<CleanTable, CleanError>;
}

impl Clean for [RawProductRecord] {
    fn clean_with(&self, cleaner: &Cleaner) -> Result<CleanTable, CleanError> {
        cleaner.clean_records(self)
    }
}

impl Clean for Vec<RawProductRecord> {
    fn clean_with(&self, cleaner: &Cleaner) -> Result<CleanTable, CleanError> {
        cleaner.clean_records(self)
    }
}

impl Clean for RawTable {
    fn clean_with(&self, cleaner: &Cleaner) -> Result<CleanTable, CleanError> {
        cleaner.clean_records(self.rows())
    }
}

impl Clean for CleanTable {
    fn clean_with(&self, cleaner: &Cleaner) -> Result<CleanTable, CleanError> {
        Ok(cleaner.clean_table(self))
    }
}

impl Clean for Value {
    fn clean_with(&self, cleaner: &Cleaner) -> Result<CleanTable, CleanError> {
        let table = RawTable::from_json(self).map_err(|err| {
            tracing::error!(error = %err, "input is not a product table");
            err
        })?;
        cleaner.clean_records(table.rows())
    }
}

/// Cleans `table` with the default rate and sentinel rules.
///
/// # Errors
///
/// Returns [`CleanError::InvalidInput`] when the input is not a table of
/// rows, or [`CleanError::Stage`] on an unexpected stage failure.
pub fn clean<T: Clean + ?Sized>(table: &T) -> Result<CleanTable, CleanError> {
    table.clean_with(&Cleaner::default())
}

#[cfg(test)]
#[path = "clean_test.rs"]
mod tests;
