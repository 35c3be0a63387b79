//! Resampling of source series onto a canonical grid.
//!
//! Two policies cover the three source families:
//! - forward-fill for step-valued series (prices fixed per settlement
//!   period);
//! - linear interpolation with a capped synthesized-run length for sampled
//!   series (weather, load profiles), where the cap keeps the resampler
//!   from fabricating values across a genuine source outage.

use chrono::{DateTime, Utc};

use crate::PrognoseError;
use crate::timeseries::frame::TimeTable;

/// Resample `table` onto `grid` by carrying the last observation forward.
///
/// Each grid point takes the most recent observed value at or before it;
/// the last observation is carried through the end of the grid. Grid points
/// before the first observation stay missing. Values are never
/// interpolated. An aligned, fully observed series comes back unchanged.
///
/// # Errors
/// Returns `Data` when `grid` is not strictly ascending.
pub fn resample_ffill(
    table: &TimeTable,
    grid: &[DateTime<Utc>],
) -> Result<TimeTable, PrognoseError> {
    resample_with(table, grid, FillPolicy::Forward)
}

/// Resample `table` onto `grid` by linear interpolation between
/// observations, synthesizing at most `max_run` consecutive grid points.
///
/// Grid points that coincide with an observation keep the observed value.
/// Between two observations, up to `max_run` grid points are synthesized
/// from the leading edge of the gap; the remainder of a longer gap stays
/// missing, signaling data absence to downstream consumers instead of
/// smoothing over an outage. Points before the first or after the last
/// observation are never extrapolated. An aligned, fully observed series
/// comes back unchanged.
///
/// # Errors
/// Returns `Data` when `grid` is not strictly ascending.
pub fn resample_interpolated(
    table: &TimeTable,
    grid: &[DateTime<Utc>],
    max_run: usize,
) -> Result<TimeTable, PrognoseError> {
    resample_with(table, grid, FillPolicy::Interpolate { max_run })
}

#[derive(Clone, Copy)]
enum FillPolicy {
    Forward,
    Interpolate { max_run: usize },
}

fn resample_with(
    table: &TimeTable,
    grid: &[DateTime<Utc>],
    policy: FillPolicy,
) -> Result<TimeTable, PrognoseError> {
    let mut columns = Vec::with_capacity(table.width());
    for col in table.columns() {
        let observations: Vec<(DateTime<Utc>, f64)> = table
            .index()
            .iter()
            .zip(col.values())
            .filter_map(|(ts, v)| v.map(|v| (*ts, v)))
            .collect();
        let values = match policy {
            FillPolicy::Forward => fill_forward(&observations, grid),
            FillPolicy::Interpolate { max_run } => {
                fill_interpolated(&observations, grid, max_run)
            }
        };
        columns.push((col.name().to_string(), values));
    }
    TimeTable::new(grid.to_vec(), columns)
}

fn fill_forward(
    observations: &[(DateTime<Utc>, f64)],
    grid: &[DateTime<Utc>],
) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(grid.len());
    let mut i = 0;
    let mut last = None;
    for &t in grid {
        while i < observations.len() && observations[i].0 <= t {
            last = Some(observations[i].1);
            i += 1;
        }
        out.push(last);
    }
    out
}

fn fill_interpolated(
    observations: &[(DateTime<Utc>, f64)],
    grid: &[DateTime<Utc>],
    max_run: usize,
) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(grid.len());
    let mut i = 0;
    let mut prev: Option<(DateTime<Utc>, f64)> = None;
    // Consecutive grid points without an observation; resets at each
    // observed grid point, so the cap applies per gap.
    let mut run = 0usize;
    for &t in grid {
        let mut observed = None;
        while i < observations.len() && observations[i].0 <= t {
            if observations[i].0 == t {
                observed = Some(observations[i].1);
            }
            prev = Some(observations[i]);
            i += 1;
        }
        if let Some(v) = observed {
            out.push(Some(v));
            run = 0;
            continue;
        }
        run += 1;
        let synthesized = if run <= max_run {
            match (prev, observations.get(i)) {
                (Some((t0, v0)), Some(&(t1, v1))) => Some(lerp(t0, v0, t1, v1, t)),
                _ => None,
            }
        } else {
            None
        };
        out.push(synthesized);
    }
    out
}

fn lerp(t0: DateTime<Utc>, v0: f64, t1: DateTime<Utc>, v1: f64, t: DateTime<Utc>) -> f64 {
    let span = (t1 - t0).num_seconds();
    if span == 0 {
        return v1;
    }
    let frac = (t - t0).num_seconds() as f64 / span as f64;
    v0 + (v1 - v0) * frac
}
