use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::PrognoseError;
use crate::timeseries::frame::TimeTable;

/// Merge two tables by outer join on the time axis.
///
/// The result's index is the sorted union of both indexes; columns appear
/// left-table-first, and values are aligned by timestamp with missing
/// slots where a table has no row. When both tables carry a column with
/// the same name, the **right table wins**: its values replace the left
/// column in place (last-writer-wins by merge order). Callers that need a
/// collision to be fatal should check [`TimeTable::has_column`] first.
///
/// # Errors
/// Propagates `Data` errors from table reconstruction.
pub fn outer_join(left: &TimeTable, right: &TimeTable) -> Result<TimeTable, PrognoseError> {
    let index: Vec<DateTime<Utc>> = left
        .index()
        .iter()
        .chain(right.index())
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut columns: Vec<(String, Vec<Option<f64>>)> =
        Vec::with_capacity(left.width() + right.width());
    for col in left.columns() {
        columns.push((
            col.name().to_string(),
            align(left.index(), col.values(), &index),
        ));
    }
    for col in right.columns() {
        let values = align(right.index(), col.values(), &index);
        if let Some(existing) = columns.iter_mut().find(|(name, _)| name.as_str() == col.name()) {
            existing.1 = values;
        } else {
            columns.push((col.name().to_string(), values));
        }
    }
    TimeTable::new(index, columns)
}

/// Re-align `values` from `from_index` onto `to_index`, filling gaps with
/// `None`. Both indexes are ascending, so one forward pass suffices.
fn align(
    from_index: &[DateTime<Utc>],
    values: &[Option<f64>],
    to_index: &[DateTime<Utc>],
) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(to_index.len());
    let mut i = 0;
    for &t in to_index {
        while i < from_index.len() && from_index[i] < t {
            i += 1;
        }
        if i < from_index.len() && from_index[i] == t {
            out.push(values[i]);
        } else {
            out.push(None);
        }
    }
    out
}
