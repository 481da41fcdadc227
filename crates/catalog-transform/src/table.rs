//! Row containers for the two ends of the cleaning pipeline.

use catalog_core::{CleanProductRecord, Column, RawProductRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CleanError, InvalidInputKind};

/// An ordered table of raw, untyped product rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawTable {
    rows: Vec<RawProductRecord>,
}

impl RawTable {
    #[must_use]
    pub fn new(rows: Vec<RawProductRecord>) -> Self {
        Self { rows }
    }

    /// Builds a table from loosely typed JSON.
    ///
    /// The value must be an array of objects. Known columns are read;
    /// absent keys become null and unknown keys are ignored. Numbers are
    /// kept in their textual form so coercion sees the same input a scraper
    /// would have produced.
    ///
    /// # Errors
    ///
    /// Returns [`CleanError::InvalidInput`] when the value is not an array,
    /// a row is not an object, or a cell is a boolean, array or object.
    pub fn from_json(value: &Value) -> Result<Self, CleanError> {
        let invalid = |kind| CleanError::InvalidInput { kind };

        let items = value
            .as_array()
            .ok_or_else(|| invalid(InvalidInputKind::NotAnArray))?;

        let mut rows = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let object = item
                .as_object()
                .ok_or_else(|| invalid(InvalidInputKind::RowNotAnObject { index }))?;

            let mut record = RawProductRecord::default();
            for column in Column::ALL {
                let cell = match object.get(column.as_str()) {
                    None | Some(Value::Null) => None,
                    Some(Value::String(s)) => Some(s.clone()),
                    Some(Value::Number(n)) => Some(n.to_string()),
                    Some(_) => {
                        return Err(invalid(InvalidInputKind::UnsupportedCell {
                            index,
                            column: column.as_str().to_owned(),
                        }))
                    }
                };
                *record.slot_mut(column) = cell;
            }
            rows.push(record);
        }

        Ok(Self { rows })
    }

    #[must_use]
    pub fn rows(&self) -> &[RawProductRecord] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<Vec<RawProductRecord>> for RawTable {
    fn from(rows: Vec<RawProductRecord>) -> Self {
        Self::new(rows)
    }
}

/// An ordered table of validated rows, positions `0..len`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CleanTable {
    rows: Vec<CleanProductRecord>,
}

impl CleanTable {
    #[must_use]
    pub fn new(rows: Vec<CleanProductRecord>) -> Self {
        Self { rows }
    }

    /// Column names in output order.
    #[must_use]
    pub fn header() -> [&'static str; 7] {
        Column::ALL.map(Column::as_str)
    }

    #[must_use]
    pub fn rows(&self) -> &[CleanProductRecord] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CleanProductRecord> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a CleanTable {
    type Item = &'a CleanProductRecord;
    type IntoIter = std::slice::Iter<'a, CleanProductRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn from_json_reads_rows_in_order() {
        let value = json!([
            {"Title": "A", "Price": "1.00", "Rating": "4.0", "Colors": "3",
             "Size": "M", "Gender": "Men", "Timestamp": "t"},
            {"Title": "B", "Price": null}
        ]);
        let table = RawTable::from_json(&value).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].title.as_deref(), Some("A"));
        assert_eq!(table.rows()[1].title.as_deref(), Some("B"));
        assert!(table.rows()[1].price.is_none());
        assert!(table.rows()[1].gender.is_none());
    }

    #[test]
    fn from_json_renders_numbers_as_text() {
        let value = json!([{"Title": "A", "Price": 100.5, "Colors": 3}]);
        let table = RawTable::from_json(&value).unwrap();
        assert_eq!(table.rows()[0].price.as_deref(), Some("100.5"));
        assert_eq!(table.rows()[0].colors.as_deref(), Some("3"));
    }

    #[test]
    fn from_json_accepts_empty_array() {
        let table = RawTable::from_json(&json!([])).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn from_json_rejects_non_array() {
        let err = RawTable::from_json(&json!({"Title": "A"})).unwrap_err();
        assert!(matches!(
            err,
            CleanError::InvalidInput {
                kind: InvalidInputKind::NotAnArray
            }
        ));
    }

    #[test]
    fn from_json_rejects_scalar_rows() {
        let err = RawTable::from_json(&json!([{"Title": "A"}, "oops"])).unwrap_err();
        assert!(matches!(
            err,
            CleanError::InvalidInput {
                kind: InvalidInputKind::RowNotAnObject { index: 1 }
            }
        ));
    }

    #[test]
    fn from_json_rejects_nested_cells() {
        let err = RawTable::from_json(&json!([{"Size": ["M", "L"]}])).unwrap_err();
        assert!(matches!(
            err,
            CleanError::InvalidInput {
                kind: InvalidInputKind::UnsupportedCell { index: 0, .. }
            }
        ));
    }

    #[test]
    fn header_lists_columns_in_order() {
        assert_eq!(
            CleanTable::header(),
            ["Title", "Price", "Rating", "Colors", "Size", "Gender", "Timestamp"]
        );
    }
}
