//! Declarative sentinel rules.
//!
//! A [`DirtyPatterns`] table maps each column to the values that disqualify
//! a row. Adding a sentinel is a data change, not a code change.

use std::collections::{BTreeMap, BTreeSet};

use catalog_core::{Column, RawProductRecord};

/// A value that disqualifies a row when found in a column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rejected {
    Literal(String),
    Null,
}

impl Rejected {
    fn matches(&self, value: Option<&str>) -> bool {
        match (self, value) {
            (Rejected::Null, None) => true,
            (Rejected::Literal(expected), Some(actual)) => expected == actual,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirtyPatterns {
    rules: BTreeMap<Column, BTreeSet<Rejected>>,
}

impl Default for DirtyPatterns {
    /// The catalog's placeholder values.
    fn default() -> Self {
        Self::empty()
            .reject(Column::Title, "Unknown Product")
            .reject(Column::Rating, "Invalid Rating")
            .reject(Column::Rating, "Not Rated")
            .reject(Column::Price, "Price Unavailable")
            .reject_null(Column::Price)
    }
}

impl DirtyPatterns {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Adds a literal sentinel for `column`.
    #[must_use]
    pub fn reject(mut self, column: Column, literal: impl Into<String>) -> Self {
        self.rules
            .entry(column)
            .or_default()
            .insert(Rejected::Literal(literal.into()));
        self
    }

    /// Treats a null in `column` as a sentinel.
    #[must_use]
    pub fn reject_null(mut self, column: Column) -> Self {
        self.rules.entry(column).or_default().insert(Rejected::Null);
        self
    }

    /// Returns the first column whose value is rejected, if any.
    #[must_use]
    pub fn first_match(&self, record: &RawProductRecord) -> Option<Column> {
        self.rules
            .iter()
            .find(|(column, rejected)| {
                let value = record.get(**column);
                rejected.iter().any(|r| r.matches(value))
            })
            .map(|(column, _)| *column)
    }

    /// Returns `true` when `value` is a sentinel for `column`.
    #[must_use]
    pub fn rejects(&self, column: Column, value: Option<&str>) -> bool {
        self.rules
            .get(&column)
            .is_some_and(|rejected| rejected.iter().any(|r| r.matches(value)))
    }
}
