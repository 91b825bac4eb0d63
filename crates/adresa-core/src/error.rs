//! Error types for adresa
//!
//! Normalization itself never fails. Errors come from the I/O and geocoding
//! edges around it.

use thiserror::Error;

use crate::geocode::GeocodeError;

/// adresa error types
#[derive(Debug, Error)]
pub enum Error {
    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Geocoding provider failure
    #[error(transparent)]
    Geocode(#[from] GeocodeError),
}

/// Result type alias for adresa operations
pub type Result<T> = std::result::Result<T, Error>;
