//! Prognose assembles forecasting predictors from independent sources onto
//! one canonical UTC grid.
//!
//! Overview
//! - Routes per-group fetches to the collaborators wired at build time
//!   (relational store, time-series store, weather provider).
//! - Validates requests before any fetch: unknown group identifiers fail at
//!   request construction, weather without a location fails at assembly.
//! - Resamples each group onto the requested grid: forward-fill for
//!   step-valued prices, capped linear interpolation for load profiles and
//!   weather observations.
//! - Merges deterministically in the fixed group order (weather, market,
//!   load profiles), independent of fetch completion order.
//!
//! Key behaviors and trade-offs
//! - Data absence is representable, not thrown: an empty source contributes
//!   no columns and the assembled table keeps the full requested index.
//! - Interpolation caps stop the resampler from fabricating values across a
//!   genuine source outage; the weather cap is derived from the feed's
//!   native cadence rather than hard-coded.
//! - Collaborator failures surface unchanged; retry policy stays with the
//!   collaborator or the caller.
//!
//! Example (mock collaborators):
//! ```rust,ignore
//! use std::sync::Arc;
//! use prognose::{Location, PredictorRequest, Prognose, Resolution};
//!
//! let prognose = Prognose::builder()
//!     .with_sql_store(sql)
//!     .with_timeseries_store(tsdb)
//!     .with_weather_service(weather)
//!     .build()?;
//!
//! let request = PredictorRequest::builder(start, end)
//!     .resolution(Resolution::QUARTER_HOUR)
//!     .location(Location::name("Arnhem"))
//!     .build()?;
//! let predictors = prognose.predictors(&request).await?;
//! ```
//!
//! See `prognose/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use crate::core::{Prognose, PrognoseBuilder};
pub use crate::router::weather::WEATHER_PARAMETERS;

// Re-export core types for convenience
pub use prognose_core::{
    Column,
    LOAD_PROFILES_MEASUREMENT,
    Location,
    MARKET_PRICES_MEASUREMENT,
    PredictorGroup,
    PredictorRequest,
    PredictorRequestBuilder,
    PrognoseConfig,
    PrognoseError,
    Resolution,
    // Collaborator contracts
    SqlStore,
    TimeSeriesStore,
    TimeTable,
    WeatherService,
    grid_table,
    time_grid,
};
