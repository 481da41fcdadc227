//! Product records shared by the extractor, the cleaner and the sinks.
//!
//! Both record types serialize with the catalog's column names
//! (`Title`, `Price`, ...) so JSON dumps, CSV headers and database columns
//! all line up without a mapping layer.

use serde::{Deserialize, Serialize};

/// A column of the product table, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Title,
    Price,
    Rating,
    Colors,
    Size,
    Gender,
    Timestamp,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Title,
        Column::Price,
        Column::Rating,
        Column::Colors,
        Column::Size,
        Column::Gender,
        Column::Timestamp,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Column::Title => "Title",
            Column::Price => "Price",
            Column::Rating => "Rating",
            Column::Colors => "Colors",
            Column::Size => "Size",
            Column::Gender => "Gender",
            Column::Timestamp => "Timestamp",
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One product card as scraped, before any validation.
///
/// Every field is optional: a field that could not be located or parsed is
/// `None`. `timestamp` is stamped by the crawler and shared by every record
/// of a single run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawProductRecord {
    pub title: Option<String>,
    pub price: Option<String>,
    pub rating: Option<String>,
    pub colors: Option<String>,
    pub size: Option<String>,
    pub gender: Option<String>,
    pub timestamp: Option<String>,
}

impl RawProductRecord {
    /// Returns the value stored in `column`, if any.
    #[must_use]
    pub fn get(&self, column: Column) -> Option<&str> {
        let value = match column {
            Column::Title => &self.title,
            Column::Price => &self.price,
            Column::Rating => &self.rating,
            Column::Colors => &self.colors,
            Column::Size => &self.size,
            Column::Gender => &self.gender,
            Column::Timestamp => &self.timestamp,
        };
        value.as_deref()
    }

    /// Mutable access to the slot for `column`.
    pub fn slot_mut(&mut self, column: Column) -> &mut Option<String> {
        match column {
            Column::Title => &mut self.title,
            Column::Price => &mut self.price,
            Column::Rating => &mut self.rating,
            Column::Colors => &mut self.colors,
            Column::Size => &mut self.size,
            Column::Gender => &mut self.gender,
            Column::Timestamp => &mut self.timestamp,
        }
    }

    /// Returns `true` when any column is `None`.
    #[must_use]
    pub fn has_null(&self) -> bool {
        Column::ALL.into_iter().any(|c| self.get(c).is_none())
    }
}

/// A validated product row.
///
/// `price` is already converted to the target currency. `size` and
/// `gender` are free text; no vocabulary is enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CleanProductRecord {
    pub title: String,
    pub price: f64,
    pub rating: f64,
    pub colors: i64,
    pub size: String,
    pub gender: String,
    pub timestamp: String,
}

impl CleanProductRecord {
    /// Returns `true` when both floating-point columns hold finite values.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.price.is_finite() && self.rating.is_finite()
    }

    /// A hashable identity for full-row duplicate detection.
    ///
    /// Floats are compared by bit pattern, so `0.0` and `-0.0` are distinct
    /// rows, matching what a textual export would show.
    #[must_use]
    pub fn row_key(&self) -> (String, u64, u64, i64, String, String, String) {
        (
            self.title.clone(),
            self.price.to_bits(),
            self.rating.to_bits(),
            self.colors,
            self.size.clone(),
            self.gender.clone(),
            self.timestamp.clone(),
        )
    }
}
