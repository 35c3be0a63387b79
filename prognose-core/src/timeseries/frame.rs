use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::PrognoseError;

/// One named numeric series within a [`TimeTable`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    name: String,
    values: Vec<Option<f64>>,
}

impl Column {
    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Values aligned with the owning table's index; `None` marks a missing
    /// observation.
    #[must_use]
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }
}

/// A UTC time-indexed table of named numeric columns.
///
/// Invariants, enforced by the constructors and preserved by every
/// operation:
/// - the index is strictly ascending (and therefore deduplicated);
/// - every column holds exactly one value slot per index entry;
/// - column names are unique within one table.
///
/// An empty table is a valid value, not an error: a zero-column table over
/// the full requested index means "no data available".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeTable {
    index: Vec<DateTime<Utc>>,
    columns: Vec<Column>,
}

impl TimeTable {
    /// Build a zero-column table over `index`.
    ///
    /// # Errors
    /// Returns `Data` when the index is not strictly ascending.
    pub fn empty(index: Vec<DateTime<Utc>>) -> Result<Self, PrognoseError> {
        ensure_ascending(&index)?;
        Ok(Self {
            index,
            columns: Vec::new(),
        })
    }

    /// Build a table from an index and `(name, values)` pairs.
    ///
    /// # Errors
    /// Returns `Data` when the index is not strictly ascending, a column's
    /// length differs from the index length, or a column name repeats.
    pub fn new(
        index: Vec<DateTime<Utc>>,
        columns: Vec<(String, Vec<Option<f64>>)>,
    ) -> Result<Self, PrognoseError> {
        ensure_ascending(&index)?;
        let mut out: Vec<Column> = Vec::with_capacity(columns.len());
        for (name, values) in columns {
            if values.len() != index.len() {
                return Err(PrognoseError::data(format!(
                    "column {name:?} has {} values for {} index entries",
                    values.len(),
                    index.len()
                )));
            }
            if out.iter().any(|c| c.name == name) {
                return Err(PrognoseError::data(format!(
                    "duplicate column name {name:?}"
                )));
            }
            out.push(Column { name, values });
        }
        Ok(Self {
            index,
            columns: out,
        })
    }

    /// Build a single-column table from fully observed timestamped values.
    ///
    /// # Errors
    /// Returns `Data` when the timestamps are not strictly ascending.
    pub fn of_series(
        name: impl Into<String>,
        observations: Vec<(DateTime<Utc>, f64)>,
    ) -> Result<Self, PrognoseError> {
        let (index, values): (Vec<_>, Vec<_>) = observations
            .into_iter()
            .map(|(ts, v)| (ts, Some(v)))
            .unzip();
        Self::new(index, vec![(name.into(), values)])
    }

    /// Timestamps of the rows.
    #[must_use]
    pub fn index(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// True when the table has no rows or no columns.
    ///
    /// This is the emptiness test the source fetches rely on: a series with
    /// an index but no columns carries no data, and vice versa.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty() || self.columns.is_empty()
    }

    /// Columns in their current order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in their current order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Whether a column with this name exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Rename a column, overwriting any existing column with the target
    /// name. Returns `true` when a column named `from` existed.
    ///
    /// The overwrite is what the weather schema repair needs: a `source_1`
    /// artifact replaces an original `source` before both are dropped.
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        if from == to {
            return self.has_column(from);
        }
        if !self.has_column(from) {
            return false;
        }
        self.columns.retain(|c| c.name != to);
        if let Some(col) = self.columns.iter_mut().find(|c| c.name == from) {
            col.name = to.to_string();
        }
        true
    }

    /// Drop a column by name; returns `true` when it existed.
    pub fn drop_column(&mut self, name: &str) -> bool {
        let before = self.columns.len();
        self.columns.retain(|c| c.name != name);
        self.columns.len() != before
    }
}

fn ensure_ascending(index: &[DateTime<Utc>]) -> Result<(), PrognoseError> {
    for pair in index.windows(2) {
        if pair[0] >= pair[1] {
            return Err(PrognoseError::data(format!(
                "index must be strictly ascending: {} does not precede {}",
                pair[0], pair[1]
            )));
        }
    }
    Ok(())
}
