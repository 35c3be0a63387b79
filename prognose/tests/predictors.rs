use std::sync::Arc;

use chrono::{DateTime, Utc};
use prognose::{
    Location, PredictorGroup, PredictorRequest, Prognose, PrognoseError, Resolution, time_grid,
};
use prognose_mock::{MockSqlStore, MockTimeSeriesStore, MockWeatherService, fixtures};

fn start() -> DateTime<Utc> {
    fixtures::t("2021-01-01T00:00:00Z")
}

fn end() -> DateTime<Utc> {
    fixtures::t("2021-01-02T00:00:00Z")
}

fn aggregator(
    sql: &Arc<MockSqlStore>,
    tsdb: &Arc<MockTimeSeriesStore>,
    weather: &Arc<MockWeatherService>,
) -> Prognose {
    Prognose::builder()
        .with_sql_store(sql.clone())
        .with_timeseries_store(tsdb.clone())
        .with_weather_service(weather.clone())
        .build()
        .unwrap()
}

fn populated_tsdb() -> MockTimeSeriesStore {
    MockTimeSeriesStore::empty()
        .with_measurement(
            "marketprices",
            fixtures::series("Price", start(), Resolution::HOUR, &[30.0, 31.5, 29.8]),
        )
        .with_measurement(
            "sjv",
            fixtures::table(
                start(),
                Resolution::QUARTER_HOUR,
                &[
                    ("sjv_E1A", &[Some(0.2), Some(0.3), Some(0.4)]),
                    ("sjv_E1B", &[Some(0.5), Some(0.6), Some(0.7)]),
                ],
            ),
        )
}

#[tokio::test]
async fn assembles_all_groups_in_the_fixed_order_by_default() {
    let sql = Arc::new(MockSqlStore::returning(fixtures::series(
        "price",
        start(),
        Resolution::from_minutes(360).unwrap(),
        &[21.3, 21.8],
    )));
    let tsdb = Arc::new(populated_tsdb());
    let weather = Arc::new(MockWeatherService::returning(fixtures::table(
        start(),
        Resolution::THREE_HOURS,
        &[
            ("temp", &[Some(2.5), Some(3.1)]),
            ("radiation", &[Some(0.0), Some(12.0)]),
        ],
    )));

    let prognose = aggregator(&sql, &tsdb, &weather);
    let request = PredictorRequest::builder(start(), end())
        .resolution(Resolution::QUARTER_HOUR)
        .location(Location::name("Arnhem"))
        .build()
        .unwrap();

    let predictors = prognose.predictors(&request).await.unwrap();
    // Group order first (weather, market, load profiles), source-native
    // column order within each group.
    assert_eq!(
        predictors.names(),
        vec!["temp", "radiation", "APX", "Elba", "sjv_E1A", "sjv_E1B"]
    );
    assert_eq!(predictors.len(), 97);
    assert_eq!(
        predictors.index(),
        time_grid(start(), end(), Some(Resolution::QUARTER_HOUR))
            .unwrap()
            .as_slice()
    );
}

#[tokio::test]
async fn weather_without_a_location_fails_before_any_fetch() {
    let sql = Arc::new(MockSqlStore::empty());
    let tsdb = Arc::new(MockTimeSeriesStore::empty());
    let weather = Arc::new(MockWeatherService::empty());

    let prognose = aggregator(&sql, &tsdb, &weather);
    let request = PredictorRequest::builder(start(), end())
        .resolution(Resolution::HOUR)
        .build()
        .unwrap();

    let err = prognose.predictors(&request).await.unwrap_err();
    assert!(matches!(err, PrognoseError::Config(_)));
    // No partial work: not a single collaborator was touched.
    assert_eq!(weather.calls(), 0);
    assert_eq!(tsdb.calls(), 0);
    assert_eq!(sql.calls(), 0);
}

#[tokio::test]
async fn empty_sources_yield_zero_columns_over_the_full_grid() {
    let sql = Arc::new(MockSqlStore::empty());
    let tsdb = Arc::new(MockTimeSeriesStore::empty());
    let weather = Arc::new(MockWeatherService::empty());

    let prognose = aggregator(&sql, &tsdb, &weather);
    let request = PredictorRequest::builder(start(), end())
        .resolution(Resolution::HOUR)
        .location(Location::name("Arnhem"))
        .build()
        .unwrap();

    let predictors = prognose.predictors(&request).await.unwrap();
    assert_eq!(predictors.width(), 0);
    assert_eq!(
        predictors.index(),
        time_grid(start(), end(), Some(Resolution::HOUR))
            .unwrap()
            .as_slice()
    );
}

#[tokio::test]
async fn a_subset_request_only_touches_its_own_sources() {
    let sql = Arc::new(MockSqlStore::empty());
    let tsdb = Arc::new(populated_tsdb());
    let weather = Arc::new(MockWeatherService::empty());

    let prognose = aggregator(&sql, &tsdb, &weather);
    let request = PredictorRequest::builder(start(), end())
        .resolution(Resolution::HOUR)
        .groups([PredictorGroup::MarketData])
        .build()
        .unwrap();

    let predictors = prognose.predictors(&request).await.unwrap();
    assert_eq!(predictors.names(), vec!["APX"]);
    assert_eq!(weather.calls(), 0);
    assert_eq!(sql.calls(), 1);
    assert_eq!(tsdb.calls(), 1);
}

#[tokio::test]
async fn output_order_follows_the_fixed_group_order_not_the_request_order() {
    let sql = Arc::new(MockSqlStore::returning(fixtures::series(
        "price",
        start(),
        Resolution::HOUR,
        &[21.3],
    )));
    let tsdb = Arc::new(populated_tsdb());
    let weather = Arc::new(MockWeatherService::empty());

    let prognose = aggregator(&sql, &tsdb, &weather);
    let request = PredictorRequest::builder(start(), end())
        .resolution(Resolution::HOUR)
        .groups([PredictorGroup::LoadProfiles, PredictorGroup::MarketData])
        .build()
        .unwrap();

    let predictors = prognose.predictors(&request).await.unwrap();
    assert_eq!(
        predictors.names(),
        vec!["APX", "Elba", "sjv_E1A", "sjv_E1B"]
    );
}

#[tokio::test]
async fn collaborator_failures_surface_unchanged() {
    let sql = Arc::new(MockSqlStore::failing("connection refused"));
    let tsdb = Arc::new(MockTimeSeriesStore::empty());
    let weather = Arc::new(MockWeatherService::empty());

    let prognose = aggregator(&sql, &tsdb, &weather);
    let request = PredictorRequest::builder(start(), end())
        .groups([PredictorGroup::MarketData])
        .build()
        .unwrap();

    let err = prognose.predictors(&request).await.unwrap_err();
    match err {
        PrognoseError::Source { collaborator, msg } => {
            assert_eq!(collaborator, "mock-sql");
            assert_eq!(msg, "connection refused");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn the_builder_requires_all_three_collaborators() {
    let err = Prognose::builder()
        .with_sql_store(Arc::new(MockSqlStore::empty()))
        .build()
        .unwrap_err();
    assert!(matches!(err, PrognoseError::InvalidArg(_)));
}
