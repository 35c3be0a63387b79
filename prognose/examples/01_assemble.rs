//! Assemble all three predictor groups from mock collaborators onto a
//! 15-minute grid.

use std::sync::Arc;

use prognose::{Location, PredictorRequest, Prognose, Resolution};
use prognose_mock::{MockSqlStore, MockTimeSeriesStore, MockWeatherService, fixtures};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let start = fixtures::t("2021-01-01T00:00:00Z");
    let end = fixtures::t("2021-01-02T00:00:00Z");

    let tsdb = MockTimeSeriesStore::empty()
        .with_measurement(
            "marketprices",
            fixtures::series("Price", start, Resolution::HOUR, &[48.2, 50.1, 47.6]),
        )
        .with_measurement(
            "sjv",
            fixtures::series(
                "sjv_E1A",
                start,
                Resolution::QUARTER_HOUR,
                &[0.21, 0.20, 0.19, 0.18],
            ),
        );
    let sql = MockSqlStore::returning(fixtures::series(
        "price",
        start,
        "6H".parse()?,
        &[21.3, 21.8],
    ));
    let weather = MockWeatherService::returning(fixtures::series(
        "temp",
        start,
        Resolution::THREE_HOURS,
        &[2.5, 3.1, 4.0],
    ));

    let prognose = Prognose::builder()
        .with_sql_store(Arc::new(sql))
        .with_timeseries_store(Arc::new(tsdb))
        .with_weather_service(Arc::new(weather))
        .build()?;

    let request = PredictorRequest::builder(start, end)
        .resolution(Resolution::QUARTER_HOUR)
        .location(Location::name("Arnhem"))
        .build()?;
    let predictors = prognose.predictors(&request).await?;

    println!(
        "assembled {} rows x {} columns: {:?}",
        predictors.len(),
        predictors.width(),
        predictors.names()
    );
    Ok(())
}
