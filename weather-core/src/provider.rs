use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

use crate::{
    Config, LookupError,
    model::{Coordinates, CurrentConditions, GeocodedLocation, ResolvedLocation},
    provider::{fixed::FixedGeolocator, open_meteo::OpenMeteoClient},
};

pub mod fixed;
pub mod open_meteo;

/// Geocoding collaborator.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// Best match for a place name, or `None` when the service found nothing.
    async fn search(&self, name: &str) -> Result<Option<GeocodedLocation>, LookupError>;

    /// Best place name for a coordinate pair, or `None` when nothing matched.
    async fn reverse(&self, coordinates: Coordinates)
    -> Result<Option<ResolvedLocation>, LookupError>;
}

/// Weather-data collaborator.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn current_conditions(
        &self,
        coordinates: Coordinates,
    ) -> Result<CurrentConditions, LookupError>;
}

/// Single-shot device position. Denial or unavailability is reported as
/// [`LookupError::GeolocationDenied`].
#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinates, LookupError>;
}

/// Collaborators a lookup needs, built from config.
#[derive(Debug, Clone)]
pub struct Services {
    pub geocoder: Arc<dyn Geocoder>,
    pub weather: Arc<dyn WeatherSource>,
    /// `None` when the host has no way to acquire a position.
    pub geolocator: Option<Arc<dyn Geolocator>>,
}

/// Construct the Open-Meteo backed services and the configured geolocator.
pub fn services_from_config(config: &Config) -> anyhow::Result<Services> {
    let client = Arc::new(OpenMeteoClient::from_config(config)?);

    Ok(Services {
        geocoder: client.clone(),
        weather: client,
        geolocator: geolocator_from_config(config),
    })
}

pub fn geolocator_from_config(config: &Config) -> Option<Arc<dyn Geolocator>> {
    config
        .home
        .map(|home| Arc::new(FixedGeolocator::new(home)) as Arc<dyn Geolocator>)
}
