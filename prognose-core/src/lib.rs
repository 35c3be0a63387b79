//! prognose-core
//!
//! Core types, traits, and utilities shared across the prognose ecosystem.
//!
//! - `types`: request vocabulary (predictor groups, resolutions, locations)
//!   and aggregator configuration.
//! - `source`: the collaborator role traits for the relational store, the
//!   time-series store, and the weather provider.
//! - `timeseries`: the central [`TimeTable`] plus canonical-grid
//!   construction, resampling, and outer-join merging.
//!
//! Everything here is call-scoped: requests, fetched tables, and the
//! assembled result live for one aggregation and are discarded when the
//! call returns. The index type is always `DateTime<Utc>`; naive or
//! non-UTC timestamps cannot enter the data model.
#![warn(missing_docs)]

/// Unified error type and helper constructors.
pub mod error;
/// Collaborator role traits consumed by the aggregator.
pub mod source;
/// Time-series utilities: grids, resampling, and table merging.
pub mod timeseries;
pub mod types;

pub use error::PrognoseError;
pub use source::{
    LOAD_PROFILES_MEASUREMENT, MARKET_PRICES_MEASUREMENT, SqlStore, TimeSeriesStore,
    WeatherService,
};
pub use timeseries::frame::{Column, TimeTable};
pub use timeseries::grid::{grid_table, time_grid};
pub use timeseries::merge::outer_join;
pub use timeseries::resample::{resample_ffill, resample_interpolated};
pub use types::*;
