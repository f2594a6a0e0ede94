use serde::{Deserialize, Serialize};

use crate::classify::{WeatherInfo, classify_weather};

/// Name shown when reverse geocoding finds nothing for a coordinate pair.
pub const UNNAMED_LOCATION: &str = "Your Location";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// What the user asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    Name(String),
    Coordinates(Coordinates),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub name: String,
    /// Country code, or full country name, or empty.
    pub country_label: String,
}

impl ResolvedLocation {
    pub fn unnamed() -> Self {
        Self {
            name: UNNAMED_LOCATION.to_string(),
            country_label: String::new(),
        }
    }
}

/// Forward geocoding result: the place plus where it is.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedLocation {
    pub location: ResolvedLocation,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub apparent_temperature_c: f64,
    pub humidity_percent: f64,
    pub wind_speed_mps: f64,
    pub wind_direction_deg: f64,
    pub weather_code: i32,
}

/// Everything the result panel shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRecord {
    pub name: String,
    pub country_label: String,
    pub temperature: i64,
    pub feels_like: i64,
    pub humidity_percent: f64,
    pub wind_speed_mps: f64,
    pub weather_code: i32,
    pub visibility_km: f64,
}

impl DisplayRecord {
    pub fn new(
        location: ResolvedLocation,
        conditions: &CurrentConditions,
        visibility_km: f64,
    ) -> Self {
        Self {
            name: location.name,
            country_label: location.country_label,
            temperature: conditions.temperature_c.round() as i64,
            feels_like: conditions.apparent_temperature_c.round() as i64,
            humidity_percent: conditions.humidity_percent,
            wind_speed_mps: conditions.wind_speed_mps,
            weather_code: conditions.weather_code,
            visibility_km,
        }
    }

    pub fn weather_info(&self) -> WeatherInfo {
        classify_weather(self.weather_code)
    }

    pub fn wind_speed_kmh(&self) -> i64 {
        (self.wind_speed_mps * 3.6).round() as i64
    }

    /// "Paris, FR", or just the name when there is no country label.
    pub fn place_label(&self) -> String {
        if self.country_label.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country_label)
        }
    }
}
