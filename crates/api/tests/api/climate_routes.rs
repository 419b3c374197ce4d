use crate::helpers::{measurement, mock_stations, spawn_app, MockObservationAccess};
use axum::http::StatusCode;
use climate_api::{db, DateRange};
use serde_json::{json, Value};
use std::{sync::Arc, time::Duration};
use time::macros::date;

fn year_of_measurements() -> Vec<climate_api::Measurement> {
    vec![
        measurement("USC00519397", date!(2016 - 08 - 23), Some(0.0), 81.0),
        measurement("USC00513117", date!(2016 - 08 - 23), Some(0.15), 76.0),
        measurement("USC00517948", date!(2016 - 08 - 23), None, 80.0),
        measurement("USC00519397", date!(2017 - 08 - 22), Some(0.0), 82.0),
        measurement("USC00519397", date!(2017 - 08 - 23), Some(0.0), 81.0),
        measurement("USC00513117", date!(2017 - 08 - 23), None, 82.0),
    ]
}

fn january_readings() -> Vec<(time::Date, f64)> {
    vec![
        (date!(2017 - 01 - 01), 70.0),
        (date!(2017 - 01 - 01), 75.0),
        (date!(2017 - 01 - 01), 80.0),
    ]
}

#[tokio::test]
async fn precipitation_covers_year_before_latest_measurement() {
    let mut store = MockObservationAccess::new();
    store
        .expect_latest_measurement_date()
        .times(1)
        .returning(|| Ok(Some(date!(2017 - 08 - 23))));
    store
        .expect_measurements_since()
        .withf(|since| *since == date!(2016 - 08 - 23))
        .times(1)
        .returning(|_| Ok(year_of_measurements()));

    let test_app = spawn_app(Arc::new(store)).await;
    let (status, body) = test_app.get("/api/v1.0/precipitation").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        r#"{"2016-08-23":[0.0,0.15,null],"2017-08-22":[0.0],"2017-08-23":[0.0,null]}"#
    );
}

#[tokio::test]
async fn tobs_only_includes_catalogued_stations() {
    let mut store = MockObservationAccess::new();
    store
        .expect_latest_measurement_date()
        .returning(|| Ok(Some(date!(2017 - 08 - 23))));
    store
        .expect_measurements_since()
        .withf(|since| *since == date!(2016 - 08 - 23))
        .returning(|_| Ok(year_of_measurements()));
    store
        .expect_stations()
        .times(1)
        .returning(|| Ok(mock_stations()));

    let test_app = spawn_app(Arc::new(store)).await;
    let (status, body) = test_app.get("/api/v1.0/tobs").await;

    assert_eq!(status, StatusCode::OK);
    // USC00517948 is not in the catalog
    assert_eq!(
        body,
        r#"{"2016-08-23":[81.0,76.0],"2017-08-22":[82.0],"2017-08-23":[81.0,82.0]}"#
    );
}

#[tokio::test]
async fn stations_are_returned_verbatim() {
    let mut store = MockObservationAccess::new();
    store
        .expect_stations()
        .times(1)
        .returning(|| Ok(mock_stations()));

    let test_app = spawn_app(Arc::new(store)).await;
    let (status, body) = test_app.get("/api/v1.0/stations").await;

    assert_eq!(status, StatusCode::OK);
    let stations: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        stations,
        json!([
            {
                "id": 1,
                "station": "USC00519397",
                "name": "WAIKIKI 717.2, HI US",
                "latitude": 21.2716,
                "longitude": -157.8168,
                "elevation": 3.0
            },
            {
                "id": 2,
                "station": "USC00513117",
                "name": "KANEOHE 838.1, HI US",
                "latitude": 21.4234,
                "longitude": -157.8015,
                "elevation": 14.6
            }
        ])
    );
}

#[tokio::test]
async fn start_date_aggregates_open_ended_range() {
    let mut store = MockObservationAccess::new();
    store
        .expect_temperatures_in_range()
        .withf(|range| *range == DateRange::since(date!(2016 - 12 - 31)))
        .times(1)
        .returning(|_| {
            let mut readings = vec![(date!(2016 - 12 - 31), 62.0), (date!(2016 - 12 - 31), 71.0)];
            readings.extend(january_readings());
            Ok(readings)
        });

    let test_app = spawn_app(Arc::new(store)).await;
    let (status, body) = test_app.get("/api/v1.0/2016-12-31").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        r#"{"2016-12-31":[62.0,66.5,71.0],"2017-01-01":[70.0,75.0,80.0]}"#
    );
}

#[tokio::test]
async fn single_day_range_returns_one_triple() {
    let mut store = MockObservationAccess::new();
    store
        .expect_temperatures_in_range()
        .withf(|range| *range == DateRange::between(date!(2017 - 01 - 01), date!(2017 - 01 - 01)))
        .times(1)
        .returning(|_| Ok(january_readings()));

    let test_app = spawn_app(Arc::new(store)).await;
    let (status, body) = test_app.get("/api/v1.0/2017-01-01/2017-01-01").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"2017-01-01":[70.0,75.0,80.0]}"#);
}

#[tokio::test]
async fn single_day_range_matches_start_only_entry() {
    let mut store = MockObservationAccess::new();
    store
        .expect_temperatures_in_range()
        .times(2)
        .returning(|range| {
            Ok(january_readings()
                .into_iter()
                .filter(|(date, _)| range.contains(*date))
                .collect())
        });

    let test_app = spawn_app(Arc::new(store)).await;
    let (_, ranged) = test_app.get("/api/v1.0/2017-01-01/2017-01-01").await;
    let (_, open) = test_app.get("/api/v1.0/2017-01-01").await;

    let ranged: Value = serde_json::from_str(&ranged).unwrap();
    let open: Value = serde_json::from_str(&open).unwrap();
    assert_eq!(ranged["2017-01-01"], open["2017-01-01"]);
}

#[tokio::test]
async fn empty_range_is_an_empty_object() {
    let mut store = MockObservationAccess::new();
    store
        .expect_temperatures_in_range()
        .times(1)
        .returning(|_| Ok(vec![]));

    let test_app = spawn_app(Arc::new(store)).await;
    let (status, body) = test_app.get("/api/v1.0/2030-01-01/2030-12-31").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "{}");
}

#[tokio::test]
async fn malformed_dates_are_rejected_before_querying() {
    // no expectations: any store call panics the test
    let store = MockObservationAccess::new();
    let test_app = spawn_app(Arc::new(store)).await;

    for uri in [
        "/api/v1.0/2017-13-01",
        "/api/v1.0/01-01-2017",
        "/api/v1.0/2017-01-01/someday",
        "/api/v1.0/2017-02-30/2017-03-01",
        "/api/v1.0/+2017-01-01",
        "/api/v1.0/-2017-01-01/2017-01-02",
        "/api/v1.0/2017-01-01/+2017-01-02",
    ] {
        let (status, body) = test_app.get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        let error: Value = serde_json::from_str(&body).unwrap();
        assert!(error["error"].as_str().unwrap().contains("YYYY-MM-DD"), "{body}");
    }
}

#[tokio::test]
async fn empty_dataset_is_a_server_error() {
    let mut store = MockObservationAccess::new();
    store
        .expect_latest_measurement_date()
        .times(2)
        .returning(|| Ok(None));

    let test_app = spawn_app(Arc::new(store)).await;

    for uri in ["/api/v1.0/precipitation", "/api/v1.0/tobs"] {
        let (status, body) = test_app.get(uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert!(body.contains("No measurements"), "{body}");
    }
}

#[tokio::test]
async fn store_failures_are_service_unavailable() {
    let mut store = MockObservationAccess::new();
    store
        .expect_stations()
        .returning(|| Err(db::Error::Timeout(Duration::from_secs(10))));
    store
        .expect_temperatures_in_range()
        .returning(|_| Err(db::Error::Schema(String::from("missing table 'measurement'"))));

    let test_app = spawn_app(Arc::new(store)).await;

    let (status, _) = test_app.get("/api/v1.0/stations").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, body) = test_app.get("/api/v1.0/2017-01-01").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body.contains("missing table"), "{body}");
}

#[tokio::test]
async fn repeated_requests_are_byte_identical() {
    let mut store = MockObservationAccess::new();
    store
        .expect_latest_measurement_date()
        .returning(|| Ok(Some(date!(2017 - 08 - 23))));
    store
        .expect_measurements_since()
        .returning(|_| Ok(year_of_measurements()));

    let test_app = spawn_app(Arc::new(store)).await;
    let (_, first) = test_app.get("/api/v1.0/precipitation").await;
    let (_, second) = test_app.get("/api/v1.0/precipitation").await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn index_lists_routes() {
    let store = MockObservationAccess::new();
    let test_app = spawn_app(Arc::new(store)).await;

    let (status, html) = test_app.get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Available API routes"));
    assert!(html.contains("/api/v1.0/precipitation"));
    assert!(html.contains("/api/v1.0/START_DATE/END_DATE"));
}

#[tokio::test]
async fn health_reports_store_state() {
    let mut store = MockObservationAccess::new();
    store.expect_health_check().times(1).returning(|| Ok(()));
    let test_app = spawn_app(Arc::new(store)).await;

    let (status, body) = test_app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap()["status"], "ok");

    let mut store = MockObservationAccess::new();
    store
        .expect_health_check()
        .returning(|| Err(db::Error::Timeout(Duration::from_secs(1))));
    let test_app = spawn_app(Arc::new(store)).await;

    let (status, _) = test_app.get("/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
