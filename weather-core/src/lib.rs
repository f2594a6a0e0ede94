//! Core library for the `weather-now` CLI.
//!
//! This crate defines:
//! - Weather code classification and visibility estimation
//! - Geocoding and weather collaborators (Open-Meteo) behind traits
//! - The lookup orchestrator and its view state
//! - Configuration handling
//!
//! It is used by `weather-now-cli`, but any front end implementing
//! [`Presenter`] can drive it.

pub mod classify;
pub mod config;
pub mod error;
pub mod lookup;
pub mod model;
pub mod present;
pub mod provider;
pub mod resolver;

pub use classify::{WeatherInfo, classify_weather, estimate_visibility_km};
pub use config::{Config, Endpoints};
pub use error::LookupError;
pub use lookup::LookupOrchestrator;
pub use model::{
    Coordinates, CurrentConditions, DisplayRecord, GeocodedLocation, LocationQuery,
    ResolvedLocation,
};
pub use present::{LookupState, Panels, Presenter, RecordingPresenter};
pub use provider::{Geocoder, Geolocator, Services, WeatherSource, services_from_config};
