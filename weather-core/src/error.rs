use thiserror::Error;

/// Every way a provider request can fail.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP 401: the API key is missing or was rejected.
    #[error("API key missing or rejected by the weather provider")]
    InvalidCredentials,

    /// HTTP 404: the provider knows no location matching the query.
    #[error("No location matching '{0}'")]
    LocationNotFound(String),

    /// Any other non-2xx response.
    #[error("Weather provider responded with status {status}: {message}")]
    ProviderError { status: u16, message: String },

    /// Connection failure or request timeout.
    #[error("Cannot reach the weather provider")]
    NetworkUnavailable(#[source] reqwest::Error),

    /// The body did not match the expected shape.
    #[error("Unexpected response payload from the weather provider")]
    DecodingError(#[source] serde_json::Error),
}

impl WeatherError {
    /// Status code for errors that carry one.
    pub fn status(&self) -> Option<u16> {
        match self {
            WeatherError::InvalidCredentials => Some(401),
            WeatherError::LocationNotFound(_) => Some(404),
            WeatherError::ProviderError { status, .. } => Some(*status),
            WeatherError::NetworkUnavailable(_) | WeatherError::DecodingError(_) => None,
        }
    }
}
