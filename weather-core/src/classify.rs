//! Weather code interpretation.
//!
//! Codes follow the WMO table used by Open-Meteo:
//! <https://open-meteo.com/en/docs#weathervariables>

use serde::Serialize;

/// Human-readable description and icon identifier for a weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeatherInfo {
    pub description: &'static str,
    pub icon: &'static str,
}

impl WeatherInfo {
    const fn new(description: &'static str, icon: &'static str) -> Self {
        Self { description, icon }
    }
}

const SUN: &str = "fas fa-sun text-warning";
const DRIZZLE: &str = "fas fa-cloud-drizzle text-info";
const RAIN: &str = "fas fa-cloud-rain text-primary";
const SNOW: &str = "fas fa-snowflake text-light";
const STORM: &str = "fas fa-bolt text-warning";
const FOG: &str = "fas fa-smog text-muted";

pub const UNKNOWN: WeatherInfo = WeatherInfo::new("Unknown", "fas fa-question text-muted");

/// Map a weather code to its description and icon. Total over `i32`:
/// anything outside the table is [`UNKNOWN`].
pub fn classify_weather(code: i32) -> WeatherInfo {
    match code {
        0 => WeatherInfo::new("Clear sky", SUN),
        1 => WeatherInfo::new("Mainly clear", SUN),
        2 => WeatherInfo::new("Partly cloudy", "fas fa-cloud-sun text-info"),
        3 => WeatherInfo::new("Overcast", "fas fa-cloud text-secondary"),
        45 => WeatherInfo::new("Foggy", FOG),
        48 => WeatherInfo::new("Depositing rime fog", FOG),
        51 => WeatherInfo::new("Light drizzle", DRIZZLE),
        53 => WeatherInfo::new("Moderate drizzle", DRIZZLE),
        55 => WeatherInfo::new("Dense drizzle", DRIZZLE),
        61 => WeatherInfo::new("Slight rain", RAIN),
        63 => WeatherInfo::new("Moderate rain", RAIN),
        65 => WeatherInfo::new("Heavy rain", "fas fa-cloud-showers-heavy text-primary"),
        71 => WeatherInfo::new("Slight snow", SNOW),
        73 => WeatherInfo::new("Moderate snow", SNOW),
        75 => WeatherInfo::new("Heavy snow", SNOW),
        95 => WeatherInfo::new("Thunderstorm", STORM),
        96 => WeatherInfo::new("Thunderstorm with hail", STORM),
        99 => WeatherInfo::new("Thunderstorm with heavy hail", STORM),
        _ => UNKNOWN,
    }
}

/// Rough visibility in kilometers from temperature and weather code.
///
/// First match wins: fog, then the 51..=65 precipitation range (raw code
/// range, so 56..=60 match as well), then freezing, then hot.
pub fn estimate_visibility_km(temperature_c: f64, code: i32) -> f64 {
    match code {
        45 | 48 => 0.5,
        51..=65 => 3.0,
        _ if temperature_c < 0.0 => 8.0,
        _ if temperature_c > 30.0 => 7.0,
        _ => 10.0,
    }
}
