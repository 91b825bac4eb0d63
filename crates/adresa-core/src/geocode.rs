//! Geocoding adapter seam
//!
//! The provider itself (HTTP, rate limiting, retry policy) lives outside
//! this crate. What lives here is the contract callers code against and a
//! memoizing decorator keyed by canonical address.
//!
//! # Guarantees
//!
//! - Identical canonical strings hit the provider at most once, unless the
//!   provider reported a transient failure or the entry was invalidated
//! - Transient failures are never cached

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::normalizer;
use crate::scheme::cache_key;

/// WGS84 point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Geocoding failure, classified by the provider
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeocodeError {
    /// The provider has no match for this address
    #[error("no location found for '{address}'")]
    NotFound { address: String },

    /// Network or service failure; the lookup may succeed later
    #[error("transient geocoding failure: {0}")]
    Transient(String),
}

impl GeocodeError {
    pub fn is_transient(&self) -> bool {
        matches!(self, GeocodeError::Transient(_))
    }
}

/// A geocoding provider keyed by canonical address
pub trait Geocoder {
    fn lookup(&self, canonical: &str) -> Result<Coordinates, GeocodeError>;
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn lookup(&self, canonical: &str) -> Result<Coordinates, GeocodeError> {
        (**self).lookup(canonical)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Cached {
    Found(Coordinates),
    NotFound,
}

/// Memoizes a [`Geocoder`] per canonical address under the current scheme
pub struct CachingGeocoder<G> {
    inner: G,
    entries: Mutex<HashMap<String, Cached>>,
}

impl<G: Geocoder> CachingGeocoder<G> {
    pub fn new(inner: G) -> Self {
        CachingGeocoder {
            inner,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Normalize a raw address, then look it up
    ///
    /// Degraded addresses (no street recognized) are reported as
    /// `NotFound` without calling the provider: `", Bucuresti"` would
    /// geocode to the city center for every such row.
    pub fn locate(&self, raw: &str) -> Result<Coordinates, GeocodeError> {
        let address = normalizer::parse_address(raw);
        let canonical = address.to_string();
        if address.is_degraded() {
            tracing::debug!(input = raw, "skipping lookup for degraded address");
            return Err(GeocodeError::NotFound { address: canonical });
        }
        self.lookup(&canonical)
    }

    /// Forget a cached result so the next lookup reaches the provider
    pub fn invalidate(&self, canonical: &str) -> bool {
        self.entries().remove(&cache_key(canonical)).is_some()
    }

    /// Number of cached entries, found and not-found alike
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_inner(self) -> G {
        self.inner
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Cached>> {
        // Entries are plain values; a panic elsewhere cannot leave one half-written.
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<G: Geocoder> Geocoder for CachingGeocoder<G> {
    fn lookup(&self, canonical: &str) -> Result<Coordinates, GeocodeError> {
        let key = cache_key(canonical);

        if let Some(cached) = self.entries().get(&key).copied() {
            tracing::debug!(address = canonical, "geocode cache hit");
            return match cached {
                Cached::Found(coords) => Ok(coords),
                Cached::NotFound => Err(GeocodeError::NotFound {
                    address: canonical.to_string(),
                }),
            };
        }

        tracing::debug!(address = canonical, "geocode cache miss");
        let result = self.inner.lookup(canonical);
        match &result {
            Ok(coords) => {
                self.entries().insert(key, Cached::Found(*coords));
            }
            Err(GeocodeError::NotFound { .. }) => {
                self.entries().insert(key, Cached::NotFound);
            }
            Err(GeocodeError::Transient(reason)) => {
                tracing::warn!(address = canonical, %reason, "transient geocoding failure");
            }
        }
        result
    }
}
