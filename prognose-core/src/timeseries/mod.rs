//! Time-series utilities shared by the aggregator and collaborator mocks.
//!
//! Modules include:
//! - `frame`: the central UTC time-indexed table
//! - `grid`: canonical grid construction for a requested window
//! - `resample`: forward-fill and capped linear interpolation onto a grid
//! - `merge`: outer-join merge of tables on the time axis
/// The time-indexed table and its column type.
pub mod frame;
/// Canonical grid construction.
pub mod grid;
/// Outer-join merge on the time axis.
pub mod merge;
/// Resampling onto a canonical grid.
pub mod resample;
