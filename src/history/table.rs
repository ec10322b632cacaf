// src/history/table.rs

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrapeError};

/// Rows of string cells under the header a day's page emitted.
///
/// The column set is whatever the source sends; every row has exactly
/// `columns.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct ObservationTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Observations from consecutive days, in chronological order.
pub type CombinedTable = ObservationTable;

#[derive(Deserialize)]
struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TryFrom<RawTable> for ObservationTable {
    type Error = ScrapeError;

    fn try_from(raw: RawTable) -> Result<Self> {
        ObservationTable::from_parts(raw.columns, raw.rows)
    }
}

impl ObservationTable {
    /// A table with a header and no rows.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table, rejecting any row whose width differs from the header.
    pub fn from_parts(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != columns.len())
        {
            return Err(ScrapeError::format(format!(
                "row {} has {} fields, header has {}",
                i,
                row.len(),
                columns.len()
            )));
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at `row` under `column`.
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows.get(row).map(|r| r[col].as_str())
    }

    pub fn records(&self) -> impl Iterator<Item = Observation<'_>> + '_ {
        self.rows.iter().map(move |values| Observation {
            columns: &self.columns,
            values,
        })
    }

    /// Append `other`'s rows after ours, aligning cells by column name.
    ///
    /// Columns we have not seen are added at the end; cells a row has no
    /// value for are left empty.
    pub fn append(&mut self, other: ObservationTable) {
        if self.columns.is_empty() && self.rows.is_empty() {
            *self = other;
            return;
        }
        if self.columns == other.columns {
            self.rows.extend(other.rows);
            return;
        }

        let positions: Vec<usize> = other
            .columns
            .iter()
            .map(|name| match self.column_index(name) {
                Some(i) => i,
                None => {
                    self.columns.push(name.clone());
                    self.columns.len() - 1
                }
            })
            .collect();

        let width = self.columns.len();
        for row in &mut self.rows {
            row.resize(width, String::new());
        }
        self.rows.reserve(other.rows.len());
        for row in other.rows {
            let mut aligned = vec![String::new(); width];
            for (value, &pos) in row.into_iter().zip(&positions) {
                aligned[pos] = value;
            }
            self.rows.push(aligned);
        }
    }
}

/// One row viewed as `column -> value`.
#[derive(Debug, Clone, Copy)]
pub struct Observation<'a> {
    columns: &'a [String],
    values: &'a [String],
}

impl<'a> Observation<'a> {
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let i = self.columns.iter().position(|c| c == column)?;
        self.values.get(i).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }
}

impl Serialize for Observation<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
