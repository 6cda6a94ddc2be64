//! Integration tests for the weather provider against a mock HTTP
//! service.

use std::time::Duration;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use commute_core::Coordinate;
use commute_weather::{Forecast, WeatherError, WeatherProvider};

const TIMEOUT: Duration = Duration::from_secs(2);

fn hourly_entry(temp: f64, description: &str, pop: f64) -> serde_json::Value {
    serde_json::json!({
        "temp": temp,
        "weather": [{"description": description, "icon": "10d"}],
        "pop": pop
    })
}

fn onecall_body(hourly_len: usize) -> serde_json::Value {
    let hourly: Vec<_> = (0..hourly_len)
        .map(|i| hourly_entry(10.0 + i as f64, "light rain", 0.25))
        .collect();
    serde_json::json!({
        "current": {
            "temp": 9.6,
            "weather": [{"description": "overcast clouds", "icon": "04d"}]
        },
        "hourly": hourly
    })
}

#[tokio::test]
async fn test_current_and_forecast() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/onecall"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(onecall_body(12)))
        .mount(&server)
        .await;

    let provider = WeatherProvider::with_base_url("test-key", TIMEOUT, &server.uri()).unwrap();
    let weather = provider
        .current_and_forecast(Coordinate::new(52.48, -1.90))
        .await
        .unwrap();

    assert_eq!(weather.now.label(), "9.6°C, Overcast clouds, 25% chance of rain");
    match weather.in_eight_hours {
        Forecast::Available(snapshot) => {
            assert!((snapshot.temperature_celsius - 18.0).abs() < 1e-9);
            assert_eq!(snapshot.description, "Light rain");
        }
        Forecast::Unavailable { reason } => panic!("expected forecast, got: {reason}"),
    }
}

#[tokio::test]
async fn test_short_forecast_is_unavailable_not_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/onecall"))
        .respond_with(ResponseTemplate::new(200).set_body_json(onecall_body(3)))
        .mount(&server)
        .await;

    let provider = WeatherProvider::with_base_url("test-key", TIMEOUT, &server.uri()).unwrap();
    let weather = provider
        .current_and_forecast(Coordinate::new(52.48, -1.90))
        .await
        .unwrap();

    match weather.in_eight_hours {
        Forecast::Unavailable { reason } => assert!(reason.contains("unavailable")),
        Forecast::Available(_) => panic!("three hourly entries cannot reach +8h"),
    }
}

#[tokio::test]
async fn test_service_failure_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/onecall"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let provider = WeatherProvider::with_base_url("test-key", TIMEOUT, &server.uri()).unwrap();
    let err = provider
        .current_and_forecast(Coordinate::new(52.48, -1.90))
        .await
        .unwrap_err();

    match err {
        WeatherError::Api { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("expected Api, got {other:?}"),
    }
}
