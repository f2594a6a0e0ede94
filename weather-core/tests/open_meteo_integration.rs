//! Integration tests for the Open-Meteo client and the lookup orchestrator
//! against a mock HTTP server.

use std::{sync::Arc, time::Duration};

use weather_now_core::{
    Coordinates, Geocoder, LookupError, LookupOrchestrator, LookupState, RecordingPresenter,
    Services, WeatherSource, provider::open_meteo::OpenMeteoClient,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> OpenMeteoClient {
    OpenMeteoClient::new(
        format!("{}/v1/search", server.uri()),
        format!("{}/v1/forecast", server.uri()),
        Duration::from_secs(2),
    )
    .unwrap()
}

fn orchestrator_for(server: &MockServer) -> (LookupOrchestrator, RecordingPresenter) {
    let client = Arc::new(client_for(server));
    let presenter = RecordingPresenter::default();
    let services = Services {
        geocoder: client.clone(),
        weather: client,
        geolocator: None,
    };
    (LookupOrchestrator::new(services, presenter.clone()), presenter)
}

fn current_body(temperature: f64, code: i32) -> serde_json::Value {
    serde_json::json!({
        "latitude": 23.0,
        "longitude": 72.625,
        "timezone": "Asia/Kolkata",
        "current": {
            "time": "2025-06-16T12:15",
            "interval": 900,
            "temperature_2m": temperature,
            "relative_humidity_2m": 62,
            "apparent_temperature": 38.6,
            "weather_code": code,
            "wind_speed_10m": 5.0,
            "wind_direction_10m": 240
        }
    })
}

async fn mount_forecast(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param(
            "current",
            "temperature_2m,relative_humidity_2m,apparent_temperature,weather_code,wind_speed_10m,wind_direction_10m",
        ))
        .and(query_param("timezone", "auto"))
        .and(query_param("wind_speed_unit", "ms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_search_picks_first_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "São Paulo"))
        .and(query_param("count", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{
                "id": 3448439,
                "name": "São Paulo",
                "latitude": -23.5475,
                "longitude": -46.63611,
                "country_code": "BR",
                "country": "Brazil"
            }]
        })))
        .mount(&server)
        .await;

    let found = client_for(&server).search("São Paulo").await.unwrap().unwrap();

    assert_eq!(found.location.name, "São Paulo");
    assert_eq!(found.location.country_label, "BR");
    assert_eq!(found.coordinates, Coordinates::new(-23.5475, -46.63611));
}

#[tokio::test]
async fn test_current_conditions_parsed() {
    let server = MockServer::start().await;
    mount_forecast(&server, current_body(36.4, 0)).await;

    let conditions = client_for(&server)
        .current_conditions(Coordinates::new(23.0225, 72.5714))
        .await
        .unwrap();

    assert_eq!(conditions.temperature_c, 36.4);
    assert_eq!(conditions.humidity_percent, 62.0);
    assert_eq!(conditions.wind_speed_mps, 5.0);
    assert_eq!(conditions.wind_direction_deg, 240.0);
    assert_eq!(conditions.weather_code, 0);
}

#[tokio::test]
async fn test_missing_current_is_upstream_error() {
    let server = MockServer::start().await;
    mount_forecast(&server, serde_json::json!({ "latitude": 1.0, "longitude": 2.0 })).await;

    let err = client_for(&server)
        .current_conditions(Coordinates::new(1.0, 2.0))
        .await
        .unwrap_err();

    assert!(matches!(err, LookupError::Upstream(_)));
}

#[tokio::test]
async fn test_error_status_is_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": true,
            "reason": "Latitude must be in range of -90 to 90°."
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .current_conditions(Coordinates::new(123.0, 0.0))
        .await
        .unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("400"), "Error should mention status: {}", msg);
    assert!(msg.contains("Latitude must be in range"));
}

#[tokio::test]
async fn test_lookup_by_city_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Ahmedabad"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{
                "name": "Ahmedabad",
                "latitude": 23.02579,
                "longitude": 72.58727,
                "country": "India"
            }]
        })))
        .mount(&server)
        .await;
    mount_forecast(&server, current_body(36.4, 0)).await;

    let (orchestrator, presenter) = orchestrator_for(&server);
    let record = orchestrator.lookup_by_city("Ahmedabad").await.unwrap();

    assert_eq!(record.place_label(), "Ahmedabad, India");
    assert_eq!(record.temperature, 36);
    assert_eq!(record.feels_like, 39);
    assert_eq!(record.visibility_km, 7.0);
    assert_eq!(record.wind_speed_kmh(), 18);
    assert_eq!(presenter.last(), Some(LookupState::Success(record)));
}

#[tokio::test]
async fn test_lookup_unknown_city() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "generationtime_ms": 0.4 })),
        )
        .mount(&server)
        .await;

    let (orchestrator, presenter) = orchestrator_for(&server);
    let err = orchestrator.lookup_by_city("Nonexistent City").await.unwrap_err();

    assert_eq!(err, LookupError::NotFound);
    assert_eq!(
        presenter.last(),
        Some(LookupState::Failed(
            "Error fetching weather data: City not found".into()
        ))
    );
}

#[tokio::test]
async fn test_lookup_by_coordinates_without_place_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("latitude", "48.1"))
        .and(query_param("count", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;
    mount_forecast(&server, current_body(-3.2, 3)).await;

    let (orchestrator, _presenter) = orchestrator_for(&server);
    let record = orchestrator
        .lookup_by_coordinates(Coordinates::new(48.1, 11.6))
        .await
        .unwrap();

    assert_eq!(record.name, "Your Location");
    assert_eq!(record.country_label, "");
    assert_eq!(record.temperature, -3);
    assert_eq!(record.visibility_km, 8.0);
}

#[tokio::test]
async fn test_reverse_geocoding_failure_still_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;
    mount_forecast(&server, current_body(12.0, 45)).await;

    let (orchestrator, _presenter) = orchestrator_for(&server);
    let record = orchestrator
        .lookup_by_coordinates(Coordinates::new(51.5, -0.12))
        .await
        .unwrap();

    assert_eq!(record.name, "Your Location");
    assert_eq!(record.visibility_km, 0.5);
}
