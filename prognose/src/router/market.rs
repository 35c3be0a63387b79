use chrono::{DateTime, Utc};
use prognose_core::{
    MARKET_PRICES_MEASUREMENT, PrognoseError, Resolution, TimeTable, grid_table, outer_join,
    resample_ffill, time_grid,
};

use crate::core::Prognose;
use crate::router::util::query_time;

/// Column name the electricity market-clearing price is published under.
const ELECTRICITY_PRICE_COLUMN: &str = "APX";
/// Column name the gas day-ahead price is published under.
const GAS_PRICE_COLUMN: &str = "Elba";

impl Prognose {
    /// Fetch and merge the electricity- and gas-price series.
    ///
    /// The two fetches run concurrently; the merge is the exhaustive case
    /// table over source emptiness:
    ///
    /// - only electricity non-empty → that series exactly;
    /// - only gas non-empty → that series exactly;
    /// - both empty → a zero-column table over the requested grid;
    /// - both non-empty → column-wise union (outer join on time).
    ///
    /// # Errors
    /// Collaborator failures are surfaced unchanged.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "prognose::market_data", skip(self))
    )]
    pub async fn market_data(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        resolution: Option<Resolution>,
    ) -> Result<TimeTable, PrognoseError> {
        let (electricity, gas) = tokio::join!(
            self.electricity_price(start, end, resolution),
            self.gas_price(start, end, resolution),
        );
        let electricity = electricity?;
        let gas = gas?;

        match (electricity.is_empty(), gas.is_empty()) {
            (false, true) => Ok(electricity),
            (true, false) => Ok(gas),
            (true, true) => grid_table(start, end, resolution),
            (false, false) => outer_join(&electricity, &gas),
        }
    }

    /// Fetch the electricity market-clearing price from the time-series
    /// store.
    async fn electricity_price(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        resolution: Option<Resolution>,
    ) -> Result<TimeTable, PrognoseError> {
        let query = format!(
            "SELECT \"Price\" FROM \"forecast_latest\"..\"{MARKET_PRICES_MEASUREMENT}\" \
             WHERE \"Name\" = 'APX' AND time >= '{}' AND time <= '{}'",
            query_time(start),
            query_time(end),
        );
        let mut series = self
            .tsdb
            .exec_influx_query(&query)
            .await?
            .remove(MARKET_PRICES_MEASUREMENT)
            .unwrap_or_default();
        series.rename_column("Price", ELECTRICITY_PRICE_COLUMN);
        resample_prices(series, start, end, resolution)
    }

    /// Fetch the gas day-ahead price from the relational store.
    async fn gas_price(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        resolution: Option<Resolution>,
    ) -> Result<TimeTable, PrognoseError> {
        let query = format!(
            "SELECT datetime, price FROM marketprices WHERE name = 'gasPrice' \
             AND datetime BETWEEN '{}' AND '{}' ORDER BY datetime asc",
            query_time(start),
            query_time(end),
        );
        let mut series = self.sql.exec_sql_query(&query).await?;
        series.rename_column("price", GAS_PRICE_COLUMN);
        resample_prices(series, start, end, resolution)
    }
}

/// Prices are piecewise-constant between settlement events, so forward-fill
/// is the only fill that does not fabricate intermediate values. Never
/// interpolate prices.
fn resample_prices(
    series: TimeTable,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    resolution: Option<Resolution>,
) -> Result<TimeTable, PrognoseError> {
    match resolution {
        Some(res) if !series.is_empty() => {
            resample_ffill(&series, &time_grid(start, end, Some(res))?)
        }
        _ => Ok(series),
    }
}
