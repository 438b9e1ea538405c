/// Error types for the atlas backend contracts
use crate::backend::Endpoint;
use thiserror::Error;

/// Failure of a single backend exchange.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (network, CORS, DNS...)
    #[error("{endpoint} request failed: {message}")]
    Transport { endpoint: Endpoint, message: String },

    /// Non-2xx response. `detail` carries the backend's `{error}` text when present.
    #[error("{endpoint} returned HTTP {status}: {detail}")]
    Status {
        endpoint: Endpoint,
        status: u16,
        detail: String,
    },

    /// The body was not JSON or did not have the documented shape
    #[error("malformed {endpoint} response: {message}")]
    Malformed { endpoint: Endpoint, message: String },

    /// A 2xx body that reported `{error: ...}` instead of a result
    #[error("{0}")]
    Backend(String),
}

impl ApiError {
    pub fn malformed(endpoint: Endpoint, message: impl Into<String>) -> Self {
        ApiError::Malformed {
            endpoint,
            message: message.into(),
        }
    }

    pub fn transport(endpoint: Endpoint, message: impl Into<String>) -> Self {
        ApiError::Transport {
            endpoint,
            message: message.into(),
        }
    }
}

/// Prediction form validation failure. Raised before any request is sent.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    /// A feature field is empty or not a finite number
    #[error("{label} must be a number (got {value:?})")]
    InvalidNumber {
        field: String,
        label: String,
        value: String,
    },

    /// The variant sends the station name but none is selected
    #[error("Select a station before requesting a prediction")]
    MissingStation,
}

/// A map-data record that cannot be placed on the map.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StationDefect {
    /// Element `index` of the map-data array is not a station object
    #[error("map record #{index} is not an object")]
    NotAnObject { index: usize },

    /// Element `index` has no usable `station_name`
    #[error("map record #{index} has no station_name")]
    MissingName { index: usize },

    /// A required field is absent, null, zero or not a number
    #[error("station {station} is missing {field}")]
    MissingField { station: String, field: &'static str },
}
