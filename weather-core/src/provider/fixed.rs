use async_trait::async_trait;

use crate::{LookupError, model::Coordinates};

use super::Geolocator;

/// Reports a position taken from configuration.
#[derive(Debug, Clone)]
pub struct FixedGeolocator {
    position: Coordinates,
}

impl FixedGeolocator {
    pub fn new(position: Coordinates) -> Self {
        Self { position }
    }
}

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn locate(&self) -> Result<Coordinates, LookupError> {
        let Coordinates { latitude, longitude } = self.position;
        let in_range = (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude);
        if !in_range {
            tracing::warn!("configured home position {} is out of range", self.position);
            return Err(LookupError::GeolocationDenied);
        }
        Ok(self.position)
    }
}
