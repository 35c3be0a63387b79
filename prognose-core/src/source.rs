use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::PrognoseError;
use crate::timeseries::frame::TimeTable;
use crate::types::Location;

/// Measurement name under which electricity prices are stored.
pub const MARKET_PRICES_MEASUREMENT: &str = "marketprices";
/// Measurement name under which standard load profiles are stored.
pub const LOAD_PROFILES_MEASUREMENT: &str = "sjv";

/// Role trait for the relational store; used for the gas-price series.
///
/// Implementations own connection management, retries, and credentials. The
/// aggregation core surfaces their failures unchanged and never retries.
#[async_trait]
pub trait SqlStore: Send + Sync {
    /// Execute a SQL query and return its time-ordered rows as a table.
    async fn exec_sql_query(&self, query: &str) -> Result<TimeTable, PrognoseError>;
}

/// Role trait for the time-series store; used for electricity prices and
/// load profiles.
#[async_trait]
pub trait TimeSeriesStore: Send + Sync {
    /// Execute a query and return one table per measurement name.
    ///
    /// A measurement missing from the map is treated by callers as an empty
    /// series, never as an error.
    async fn exec_influx_query(
        &self,
        query: &str,
    ) -> Result<HashMap<String, TimeTable>, PrognoseError>;
}

/// Role trait for the external weather provider.
///
/// The returned schema may carry provenance artifacts (`source`,
/// `source_1`, `input_city`, `input_city_1`) next to the requested
/// parameters; the aggregation core strips them by name, so in this
/// representation they need no numeric payload.
#[async_trait]
pub trait WeatherService: Send + Sync {
    /// Fetch the given weather parameters for one location over
    /// `[start, end]`, tagged with a data source identifier.
    async fn get_weather_data(
        &self,
        location: &Location,
        parameters: &[&str],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        source: &str,
    ) -> Result<TimeTable, PrognoseError>;
}
