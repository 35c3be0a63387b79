//! Table builders shared by tests and examples.
//!
//! These helpers panic on malformed input instead of returning errors; they
//! exist to keep test setup short, not to validate data.

use chrono::{DateTime, Duration, Utc};
use prognose_core::{Resolution, TimeTable};

/// Parse an RFC 3339 timestamp, e.g. `t("2021-01-01T06:00:00Z")`.
///
/// # Panics
/// Panics when the input does not parse.
#[must_use]
pub fn t(rfc3339: &str) -> DateTime<Utc> {
    rfc3339
        .parse()
        .expect("fixture timestamp must be valid RFC 3339")
}

/// Single-column, fully observed series at a fixed cadence from `start`.
///
/// # Panics
/// Panics when the resulting table violates its invariants, which cannot
/// happen for a positive cadence.
#[must_use]
pub fn series(name: &str, start: DateTime<Utc>, step: Resolution, values: &[f64]) -> TimeTable {
    let observations = values
        .iter()
        .enumerate()
        .map(|(i, v)| (at(start, step, i), *v))
        .collect();
    TimeTable::of_series(name, observations).expect("fixture series is ascending")
}

/// Multi-column table at a fixed cadence from `start`; `None` marks a
/// missing observation.
///
/// # Panics
/// Panics when the column lengths differ or a name repeats.
#[must_use]
pub fn table(
    start: DateTime<Utc>,
    step: Resolution,
    columns: &[(&str, &[Option<f64>])],
) -> TimeTable {
    let rows = columns.first().map_or(0, |(_, values)| values.len());
    let index = (0..rows).map(|i| at(start, step, i)).collect();
    let columns = columns
        .iter()
        .map(|(name, values)| ((*name).to_string(), values.to_vec()))
        .collect();
    TimeTable::new(index, columns).expect("fixture table is well-formed")
}

fn at(start: DateTime<Utc>, step: Resolution, i: usize) -> DateTime<Utc> {
    start + Duration::minutes(i64::from(step.minutes()) * i as i64)
}
