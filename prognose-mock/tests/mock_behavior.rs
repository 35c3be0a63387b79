use prognose_core::{
    Location, PrognoseError, Resolution, SqlStore, TimeSeriesStore, WeatherService,
};
use prognose_mock::{MockSqlStore, MockTimeSeriesStore, MockWeatherService, fixtures};

#[tokio::test]
async fn sql_mock_counts_calls_and_replays_its_table() {
    let table = fixtures::series(
        "price",
        fixtures::t("2021-01-01T00:00:00Z"),
        Resolution::HOUR,
        &[21.3, 21.8],
    );
    let mock = MockSqlStore::returning(table.clone());

    assert_eq!(mock.calls(), 0);
    let first = mock.exec_sql_query("SELECT 1").await.unwrap();
    let second = mock.exec_sql_query("SELECT 2").await.unwrap();
    assert_eq!(first, table);
    assert_eq!(second, table);
    assert_eq!(mock.calls(), 2);
}

#[tokio::test]
async fn failing_mocks_surface_a_source_error() {
    let mock = MockSqlStore::failing("connection refused");
    let err = mock.exec_sql_query("SELECT 1").await.unwrap_err();
    match err {
        PrognoseError::Source { collaborator, msg } => {
            assert_eq!(collaborator, "mock-sql");
            assert_eq!(msg, "connection refused");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(mock.calls(), 1);
}

#[tokio::test]
async fn timeseries_mock_answers_the_configured_measurements() {
    let table = fixtures::series(
        "Price",
        fixtures::t("2021-01-01T00:00:00Z"),
        Resolution::HOUR,
        &[30.0],
    );
    let mock = MockTimeSeriesStore::empty().with_measurement("marketprices", table.clone());

    let result = mock.exec_influx_query("SELECT ...").await.unwrap();
    assert_eq!(result.get("marketprices"), Some(&table));
    assert!(!result.contains_key("sjv"));
}

#[tokio::test]
async fn weather_mock_records_the_most_recent_call() {
    let mock = MockWeatherService::empty();
    assert!(mock.last_call().is_none());

    mock.get_weather_data(
        &Location::name("Arnhem"),
        &["temp", "radiation"],
        fixtures::t("2021-01-01T00:00:00Z"),
        fixtures::t("2021-01-02T00:00:00Z"),
        "optimum",
    )
    .await
    .unwrap();

    let call = mock.last_call().unwrap();
    assert_eq!(call.location, Location::name("Arnhem"));
    assert_eq!(call.parameters, vec!["temp", "radiation"]);
    assert_eq!(call.source, "optimum");
    assert_eq!(mock.calls(), 1);
}
