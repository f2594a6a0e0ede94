//! Location resolution on top of a [`Geocoder`].

use tracing::{debug, warn};

use crate::{
    LookupError,
    model::{Coordinates, GeocodedLocation, ResolvedLocation},
    provider::Geocoder,
};

/// Resolve a city name to its best match. No match is [`LookupError::NotFound`].
pub async fn resolve_by_name(
    geocoder: &dyn Geocoder,
    city_name: &str,
) -> Result<GeocodedLocation, LookupError> {
    debug!("Geocoding location name: {}", city_name);

    let found = geocoder
        .search(city_name)
        .await?
        .ok_or(LookupError::NotFound)?;

    debug!(
        "Found location: {} ({})",
        found.location.name, found.coordinates
    );
    Ok(found)
}

/// Name a coordinate pair. Never fails: no match, or a failed lookup, yields
/// the "Your Location" placeholder.
pub async fn resolve_by_coordinates(
    geocoder: &dyn Geocoder,
    coordinates: Coordinates,
) -> ResolvedLocation {
    match geocoder.reverse(coordinates).await {
        Ok(Some(location)) => location,
        Ok(None) => {
            debug!("No reverse geocoding results for {}", coordinates);
            ResolvedLocation::unnamed()
        }
        Err(e) => {
            warn!("Reverse geocoding failed for {}: {}", coordinates, e);
            ResolvedLocation::unnamed()
        }
    }
}
