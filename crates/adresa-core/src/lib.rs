//! adresa core - canonical normalizer for Bucharest postal addresses
//!
//! This is the single source of truth for address canonicalization.
//! The CLI and the Python bindings compile this same core.
//!
//! # Architecture
//!
//! ```text
//! Raw address → transliterate → separate markers → token rules → separators
//!                                                                    ↓
//!                              CanonicalAddress ← extract street / number / sector
//!                                     ↓
//!                     "Strada Name, 5, Sector 3, Bucuresti" → Geocoder (cached)
//! ```
//!
//! # Guarantees
//!
//! - **Total**: normalization never fails
//! - **Idempotent**: `normalize(normalize(x)) == normalize(x)`
//! - **Deterministic**: same input always produces identical output
//! - **Stateless**: rule tables are built once and never mutated
//!
//! # Example
//!
//! ```
//! assert_eq!(
//!     adresa_core::normalize("Bd. Unirii, Numarul 15, Sector 3, Bucuresti"),
//!     "Bulevardul Unirii, 15, Sector 3, Bucuresti"
//! );
//! ```

pub mod error;
pub mod geocode;
pub mod normalizer;
pub mod rules;
pub mod scheme;

pub use error::{Error, Result};
pub use geocode::{CachingGeocoder, Coordinates, GeocodeError, Geocoder};
pub use normalizer::{
    explain, normalize, normalize_opt, parse_address, CanonicalAddress, NormalizationTrace, Street,
};
pub use rules::StreetType;
pub use scheme::{cache_key, scheme, Scheme, SCHEME_VERSION};
