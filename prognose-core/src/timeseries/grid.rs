use chrono::{DateTime, Utc};

use crate::PrognoseError;
use crate::timeseries::frame::TimeTable;
use crate::types::Resolution;

/// Build the inclusive UTC grid spanning `[start, end]` at `resolution`.
///
/// Without a resolution the grid degenerates to the two boundary points
/// (one point when `start == end`); source-native density then comes from
/// merging data in, since resampling is skipped downstream. With a
/// resolution the grid steps from `start` and includes `end` only when it
/// lands on the cadence.
///
/// # Errors
/// Returns `InvalidArg` when `start` is after `end`.
pub fn time_grid(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    resolution: Option<Resolution>,
) -> Result<Vec<DateTime<Utc>>, PrognoseError> {
    if start > end {
        return Err(PrognoseError::invalid_arg(format!(
            "window start {start} is after window end {end}"
        )));
    }
    let Some(res) = resolution else {
        return Ok(if start == end {
            vec![start]
        } else {
            vec![start, end]
        });
    };
    let step = res.duration();
    let mut grid = Vec::new();
    let mut cursor = start;
    while cursor <= end {
        grid.push(cursor);
        match cursor.checked_add_signed(step) {
            Some(next) => cursor = next,
            None => break,
        }
    }
    Ok(grid)
}

/// Build the zero-column join target over [`time_grid`].
///
/// Merging every fetched group onto this table guarantees the assembled
/// index is exactly the requested grid, never whichever subset a source
/// happened to answer for.
///
/// # Errors
/// Returns `InvalidArg` when `start` is after `end`.
pub fn grid_table(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    resolution: Option<Resolution>,
) -> Result<TimeTable, PrognoseError> {
    TimeTable::empty(time_grid(start, end, resolution)?)
}
