use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;

use crate::{
    Config, LookupError,
    model::{Coordinates, CurrentConditions, GeocodedLocation, ResolvedLocation},
};

use super::{Geocoder, WeatherSource};

/// Variables requested from the `current` block of the forecast endpoint.
pub const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,weather_code,wind_speed_10m,wind_direction_10m";

/// Client for the Open-Meteo geocoding and forecast APIs. No API key needed.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: Client,
    geocoding_url: String,
    weather_url: String,
}

impl OpenMeteoClient {
    pub fn new(
        geocoding_url: impl Into<String>,
        weather_url: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("weather-now/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            geocoding_url: geocoding_url.into(),
            weather_url: weather_url.into(),
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::new(
            config.endpoints.geocoding_url.as_str(),
            config.endpoints.weather_url.as_str(),
            config.request_timeout(),
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        service: &str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, LookupError> {
        tracing::debug!(service, url, ?query, "sending request");

        let res = self.http.get(url).query(query).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(LookupError::upstream(format!(
                "{service} request failed with status {status}: {}",
                truncate_body(&body)
            )));
        }

        serde_json::from_str(&body)
            .map_err(|e| LookupError::upstream(format!("Failed to parse {service} JSON: {e}")))
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    results: Option<Vec<GeoResult>>,
}

#[derive(Debug, Deserialize)]
struct GeoResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country_code: Option<String>,
    country: Option<String>,
}

impl GeoResult {
    fn country_label(&self) -> String {
        let non_empty = |s: &Option<String>| s.clone().filter(|s| !s.is_empty());
        non_empty(&self.country_code)
            .or_else(|| non_empty(&self.country))
            .unwrap_or_default()
    }

    fn into_resolved(self) -> ResolvedLocation {
        ResolvedLocation {
            country_label: self.country_label(),
            name: self.name,
        }
    }
}

impl GeoResponse {
    fn first(self) -> Option<GeoResult> {
        self.results.and_then(|r| r.into_iter().next())
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<OmCurrent>,
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    apparent_temperature: f64,
    weather_code: i32,
    wind_speed_10m: f64,
    #[serde(default)]
    wind_direction_10m: f64,
}

impl From<OmCurrent> for CurrentConditions {
    fn from(c: OmCurrent) -> Self {
        Self {
            temperature_c: c.temperature_2m,
            apparent_temperature_c: c.apparent_temperature,
            humidity_percent: c.relative_humidity_2m,
            wind_speed_mps: c.wind_speed_10m,
            wind_direction_deg: c.wind_direction_10m,
            weather_code: c.weather_code,
        }
    }
}

fn coordinate_query(coordinates: Coordinates) -> Vec<(&'static str, String)> {
    vec![
        ("latitude", coordinates.latitude.to_string()),
        ("longitude", coordinates.longitude.to_string()),
    ]
}

#[async_trait]
impl Geocoder for OpenMeteoClient {
    async fn search(&self, name: &str) -> Result<Option<GeocodedLocation>, LookupError> {
        let query = [("name", name.to_string()), ("count", "1".to_string())];
        let parsed: GeoResponse = self.get_json("geocoding", &self.geocoding_url, &query).await?;

        Ok(parsed.first().map(|result| GeocodedLocation {
            coordinates: Coordinates::new(result.latitude, result.longitude),
            location: result.into_resolved(),
        }))
    }

    async fn reverse(
        &self,
        coordinates: Coordinates,
    ) -> Result<Option<ResolvedLocation>, LookupError> {
        let mut query = coordinate_query(coordinates);
        query.push(("count", "1".to_string()));
        let parsed: GeoResponse = self
            .get_json("reverse geocoding", &self.geocoding_url, &query)
            .await?;

        Ok(parsed.first().map(GeoResult::into_resolved))
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoClient {
    async fn current_conditions(
        &self,
        coordinates: Coordinates,
    ) -> Result<CurrentConditions, LookupError> {
        let mut query = coordinate_query(coordinates);
        query.extend([
            ("current", CURRENT_FIELDS.to_string()),
            ("timezone", "auto".to_string()),
            ("wind_speed_unit", "ms".to_string()),
        ]);

        let parsed: ForecastResponse = self.get_json("weather", &self.weather_url, &query).await?;

        parsed
            .current
            .map(CurrentConditions::from)
            .ok_or_else(|| LookupError::upstream("weather response has no current conditions"))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
