use std::sync::Arc;

use chrono::{DateTime, Utc};
use prognose::{
    Location, Prognose, PrognoseBuilder, Resolution, TimeTable, WEATHER_PARAMETERS,
};
use prognose_mock::{MockSqlStore, MockTimeSeriesStore, MockWeatherService, fixtures};

fn start() -> DateTime<Utc> {
    fixtures::t("2021-01-01T00:00:00Z")
}

fn arnhem() -> Location {
    Location::name("Arnhem")
}

fn builder_with(weather: &Arc<MockWeatherService>) -> PrognoseBuilder {
    Prognose::builder()
        .with_sql_store(Arc::new(MockSqlStore::empty()))
        .with_timeseries_store(Arc::new(MockTimeSeriesStore::empty()))
        .with_weather_service(weather.clone())
}

fn observations(columns: &[(&str, &[Option<f64>])]) -> TimeTable {
    fixtures::table(start(), Resolution::THREE_HOURS, columns)
}

#[tokio::test]
async fn provenance_columns_never_survive_normalization() {
    let weather = Arc::new(MockWeatherService::returning(observations(&[
        ("temp", &[Some(2.0), Some(3.0)]),
        ("source", &[None, None]),
        ("input_city", &[None, None]),
    ])));
    let prognose = builder_with(&weather).build().unwrap();

    let table = prognose
        .weather_data(start(), fixtures::t("2021-01-01T03:00:00Z"), &arnhem(), None)
        .await
        .unwrap();
    assert_eq!(table.names(), vec!["temp"]);
}

#[tokio::test]
async fn source_1_replaces_the_original_source_before_the_drop() {
    let weather = Arc::new(MockWeatherService::returning(observations(&[
        ("temp", &[Some(2.0), Some(3.0)]),
        ("source", &[None, None]),
        ("source_1", &[None, None]),
    ])));
    let prognose = builder_with(&weather).build().unwrap();

    let table = prognose
        .weather_data(start(), fixtures::t("2021-01-01T03:00:00Z"), &arnhem(), None)
        .await
        .unwrap();
    assert_eq!(table.names(), vec!["temp"]);
}

#[tokio::test]
async fn the_numbered_city_artifact_is_dropped_first() {
    // Only one of the two city artifacts is expected per response; when
    // both occur the numbered one is removed and the plain one survives.
    let weather = Arc::new(MockWeatherService::returning(observations(&[
        ("temp", &[Some(2.0), Some(3.0)]),
        ("input_city_1", &[None, None]),
        ("input_city", &[None, None]),
    ])));
    let prognose = builder_with(&weather).build().unwrap();

    let table = prognose
        .weather_data(start(), fixtures::t("2021-01-01T03:00:00Z"), &arnhem(), None)
        .await
        .unwrap();
    assert_eq!(table.names(), vec!["temp", "input_city"]);
}

#[tokio::test]
async fn the_default_cap_bridges_exactly_one_native_interval() {
    // Two 3-hourly observations on a 15-minute grid: the 11 grid points in
    // between are all synthesized.
    let weather = Arc::new(MockWeatherService::returning(fixtures::series(
        "temp",
        start(),
        Resolution::THREE_HOURS,
        &[0.0, 12.0],
    )));
    let prognose = builder_with(&weather).build().unwrap();

    let table = prognose
        .weather_data(
            start(),
            fixtures::t("2021-01-01T03:00:00Z"),
            &arnhem(),
            Some(Resolution::QUARTER_HOUR),
        )
        .await
        .unwrap();
    let values = table.column("temp").unwrap().values();
    assert_eq!(values.len(), 13);
    for (i, value) in values.iter().enumerate() {
        let v = value.expect("every point within one native interval is filled");
        assert!((v - i as f64).abs() < 1e-9, "grid point {i} = {v}");
    }
}

#[tokio::test]
async fn a_multi_interval_outage_stays_missing_past_the_cap() {
    // Observations 6 hours apart leave a 23-point gap at 15 minutes; only
    // the leading 11 points (one native interval) are synthesized.
    let weather = Arc::new(MockWeatherService::returning(fixtures::series(
        "temp",
        start(),
        Resolution::from_minutes(360).unwrap(),
        &[0.0, 24.0],
    )));
    let prognose = builder_with(&weather).build().unwrap();

    let table = prognose
        .weather_data(
            start(),
            fixtures::t("2021-01-01T06:00:00Z"),
            &arnhem(),
            Some(Resolution::QUARTER_HOUR),
        )
        .await
        .unwrap();
    let values = table.column("temp").unwrap().values();
    assert_eq!(values.len(), 25);
    assert_eq!(values[0], Some(0.0));
    assert!(values[1..=11].iter().all(Option::is_some));
    assert!(values[12..=23].iter().all(Option::is_none));
    assert_eq!(values[24], Some(24.0));
}

#[tokio::test]
async fn the_cap_scales_with_the_cadence_ratio() {
    // An hourly feed on a 30-minute grid may bridge a single point; a
    // two-hour gap leaves the rest of its points missing.
    let weather = Arc::new(MockWeatherService::returning(fixtures::series(
        "temp",
        start(),
        Resolution::from_minutes(120).unwrap(),
        &[0.0, 4.0],
    )));
    let prognose = builder_with(&weather)
        .weather_cadence(Resolution::HOUR)
        .build()
        .unwrap();

    let table = prognose
        .weather_data(
            start(),
            fixtures::t("2021-01-01T02:00:00Z"),
            &arnhem(),
            Some(Resolution::from_minutes(30).unwrap()),
        )
        .await
        .unwrap();
    assert_eq!(
        table.column("temp").unwrap().values(),
        &[Some(0.0), Some(1.0), None, None, Some(4.0)]
    );
}

#[tokio::test]
async fn the_provider_receives_the_catalog_and_the_source_tag() {
    let weather = Arc::new(MockWeatherService::empty());
    let prognose = builder_with(&weather).build().unwrap();

    prognose
        .weather_data(start(), fixtures::t("2021-01-01T03:00:00Z"), &arnhem(), None)
        .await
        .unwrap();

    let call = weather.last_call().unwrap();
    assert_eq!(call.parameters, WEATHER_PARAMETERS);
    assert_eq!(call.source, "optimum");
    assert_eq!(call.location, arnhem());
    assert_eq!(call.start, start());
}

#[tokio::test]
async fn the_source_tag_is_configurable() {
    let weather = Arc::new(MockWeatherService::empty());
    let prognose = builder_with(&weather)
        .weather_source("harmonie")
        .build()
        .unwrap();

    prognose
        .weather_data(start(), fixtures::t("2021-01-01T03:00:00Z"), &arnhem(), None)
        .await
        .unwrap();
    assert_eq!(weather.last_call().unwrap().source, "harmonie");
}
