//! Fetch only the market-data group and print the forward-filled prices.

use std::sync::Arc;

use prognose::{PredictorGroup, PredictorRequest, Prognose, Resolution};
use prognose_mock::{MockSqlStore, MockTimeSeriesStore, MockWeatherService, fixtures};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let start = fixtures::t("2021-01-01T00:00:00Z");
    let end = fixtures::t("2021-01-02T00:00:00Z");

    // Electricity settles at 00:00 and 12:00; gas has no data at all.
    let tsdb = MockTimeSeriesStore::empty().with_measurement(
        "marketprices",
        fixtures::series("Price", start, "12H".parse()?, &[30.0, 45.0]),
    );

    let prognose = Prognose::builder()
        .with_sql_store(Arc::new(MockSqlStore::empty()))
        .with_timeseries_store(Arc::new(tsdb))
        .with_weather_service(Arc::new(MockWeatherService::empty()))
        .build()?;

    let request = PredictorRequest::builder(start, end)
        .resolution(Resolution::HOUR)
        .groups([PredictorGroup::MarketData])
        .build()?;
    let table = prognose.predictors(&request).await?;

    let column = table.column("APX").expect("electricity prices present");
    for (ts, price) in table.index().iter().zip(column.values()) {
        match price {
            Some(price) => println!("{ts}  {price:>6.2}"),
            None => println!("{ts}  (missing)"),
        }
    }
    Ok(())
}
