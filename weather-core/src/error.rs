use thiserror::Error;

/// Why a lookup attempt ended in the failed state.
///
/// None of these are retried; each one replaces the result panel with a
/// single message (see [`LookupError::user_message`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The user gave no city text.
    #[error("Please enter a city name")]
    EmptyInput,

    /// Geocoding returned zero results for a name query.
    #[error("City not found")]
    NotFound,

    /// Transport failure, bad status or malformed JSON from either service.
    #[error("{0}")]
    Upstream(String),

    #[error("Unable to get your location. Please search for a city manually")]
    GeolocationDenied,

    #[error("Geolocation is not supported on this system")]
    GeolocationUnsupported,
}

impl LookupError {
    pub fn upstream(message: impl Into<String>) -> Self {
        LookupError::Upstream(message.into())
    }

    /// Message shown in the error panel.
    ///
    /// Failures from the geocoding or weather services are prefixed the same
    /// way regardless of which call failed.
    pub fn user_message(&self) -> String {
        match self {
            LookupError::NotFound | LookupError::Upstream(_) => {
                format!("Error fetching weather data: {self}")
            }
            _ => self.to_string(),
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LookupError::Upstream(format!("request timed out: {err}"))
        } else {
            LookupError::Upstream(err.to_string())
        }
    }
}
