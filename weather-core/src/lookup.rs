//! Lookup orchestration: resolve, fetch, merge, and drive the view state.
//!
//! Every lookup takes a sequence number when it starts. Only the most
//! recently started lookup may change the state or reach the presenter; an
//! older one that finishes late still returns its result to its own caller.

use parking_lot::Mutex;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use tracing::{debug, info};

use crate::{
    LookupError,
    classify::estimate_visibility_km,
    model::{Coordinates, CurrentConditions, DisplayRecord, LocationQuery, ResolvedLocation},
    present::{LookupState, Presenter},
    provider::{Geocoder, Geolocator, Services, WeatherSource},
    resolver::{resolve_by_coordinates, resolve_by_name},
};

pub struct LookupOrchestrator {
    geocoder: Arc<dyn Geocoder>,
    weather: Arc<dyn WeatherSource>,
    geolocator: Option<Arc<dyn Geolocator>>,
    presenter: Mutex<Box<dyn Presenter>>,
    state: Mutex<LookupState>,
    latest: AtomicU64,
}

impl std::fmt::Debug for LookupOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupOrchestrator")
            .field("geocoder", &self.geocoder)
            .field("weather", &self.weather)
            .field("geolocator", &self.geolocator)
            .field("state", &*self.state.lock())
            .finish_non_exhaustive()
    }
}

impl LookupOrchestrator {
    pub fn new(services: Services, presenter: impl Presenter + 'static) -> Self {
        Self {
            geocoder: services.geocoder,
            weather: services.weather,
            geolocator: services.geolocator,
            presenter: Mutex::new(Box::new(presenter)),
            state: Mutex::new(LookupState::Idle),
            latest: AtomicU64::new(0),
        }
    }

    pub fn state(&self) -> LookupState {
        self.state.lock().clone()
    }

    /// Record from the last applied successful lookup, if the view shows one.
    pub fn current_record(&self) -> Option<DisplayRecord> {
        self.state.lock().record().cloned()
    }

    pub async fn lookup(&self, query: LocationQuery) -> Result<DisplayRecord, LookupError> {
        match query {
            LocationQuery::Name(name) => self.lookup_by_city(&name).await,
            LocationQuery::Coordinates(coordinates) => {
                self.lookup_by_coordinates(coordinates).await
            }
        }
    }

    /// Weather for a city name. Blank input fails without touching the network.
    pub async fn lookup_by_city(&self, city_name: &str) -> Result<DisplayRecord, LookupError> {
        let seq = self.begin();
        let city = city_name.trim();
        if city.is_empty() {
            return self.finish(seq, Err(LookupError::EmptyInput));
        }

        self.apply(seq, LookupState::Loading);
        let result = self.fetch_by_name(city).await;
        self.finish(seq, result)
    }

    pub async fn lookup_by_coordinates(
        &self,
        coordinates: Coordinates,
    ) -> Result<DisplayRecord, LookupError> {
        let seq = self.begin();
        self.apply(seq, LookupState::Loading);
        let result = self.fetch_by_coordinates(coordinates).await;
        self.finish(seq, result)
    }

    /// Weather wherever the geolocation collaborator says we are.
    pub async fn lookup_by_current_location(&self) -> Result<DisplayRecord, LookupError> {
        let seq = self.begin();
        let Some(geolocator) = self.geolocator.clone() else {
            return self.finish(seq, Err(LookupError::GeolocationUnsupported));
        };

        self.apply(seq, LookupState::Loading);
        let coordinates = match geolocator.locate().await {
            Ok(coordinates) => coordinates,
            Err(e) => {
                debug!("Geolocation failed: {}", e);
                let err = match e {
                    LookupError::GeolocationUnsupported => e,
                    _ => LookupError::GeolocationDenied,
                };
                return self.finish(seq, Err(err));
            }
        };

        debug!("Device position: {}", coordinates);
        let result = self.fetch_by_coordinates(coordinates).await;
        self.finish(seq, result)
    }

    async fn fetch_by_name(&self, city: &str) -> Result<DisplayRecord, LookupError> {
        let found = resolve_by_name(self.geocoder.as_ref(), city).await?;
        let conditions = self.weather.current_conditions(found.coordinates).await?;
        Ok(assemble(found.location, &conditions))
    }

    async fn fetch_by_coordinates(
        &self,
        coordinates: Coordinates,
    ) -> Result<DisplayRecord, LookupError> {
        let (conditions, location) = tokio::join!(
            self.weather.current_conditions(coordinates),
            resolve_by_coordinates(self.geocoder.as_ref(), coordinates),
        );
        Ok(assemble(location, &conditions?))
    }

    fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn apply(&self, seq: u64, next: LookupState) -> bool {
        let mut state = self.state.lock();
        if self.latest.load(Ordering::SeqCst) != seq {
            debug!("Dropping state from superseded lookup #{}", seq);
            return false;
        }
        *state = next.clone();
        // Taking the presenter before releasing the state keeps renders in
        // the same order as the stored states.
        let mut presenter = self.presenter.lock();
        drop(state);
        presenter.render(&next);
        true
    }

    fn finish(
        &self,
        seq: u64,
        result: Result<DisplayRecord, LookupError>,
    ) -> Result<DisplayRecord, LookupError> {
        match &result {
            Ok(record) => {
                if self.apply(seq, LookupState::Success(record.clone())) {
                    info!("Weather for {}: {}°C", record.place_label(), record.temperature);
                }
            }
            Err(e) => {
                if self.apply(seq, LookupState::Failed(e.user_message())) {
                    info!("Lookup failed: {}", e);
                }
            }
        }
        result
    }
}

fn assemble(location: ResolvedLocation, conditions: &CurrentConditions) -> DisplayRecord {
    let visibility = estimate_visibility_km(conditions.temperature_c, conditions.weather_code);
    DisplayRecord::new(location, conditions, visibility)
}
