//! Python bindings for adresa
//!
//! Thin wrapper around `adresa-core` — ZERO logic here.
//! The spreadsheet and geocoding scripts call the canonical Rust normalizer
//! through this module so cache keys stay identical across tools.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// Normalize a raw address to its canonical form.
///
/// Guarantees:
///   - Total: never raises; unrecognized input yields ", Bucuresti"
///   - Idempotent: normalize(normalize(x)) == normalize(x)
///   - Deterministic: same input → same output
///
/// Args:
///     address: raw address text, or None for a missing cell
///
/// Returns:
///     Canonical address string
#[pyfunction]
#[pyo3(signature = (address=None))]
fn normalize(address: Option<&str>) -> String {
    adresa_core::normalize_opt(address)
}

/// Parse an address into its canonical parts.
///
/// Args:
///     address: raw address text
///
/// Returns:
///     JSON string:
///     {
///         "street": {"street_type": "Strada", "name": "..."} | null,
///         "number": "..." | null,
///         "sector": int | null
///     }
///
/// Raises:
///     ValueError: If the result cannot be serialized
#[pyfunction]
fn parse_address(address: &str) -> PyResult<String> {
    let parsed = adresa_core::parse_address(address);
    serde_json::to_string_pretty(&parsed)
        .map_err(|e| PyValueError::new_err(format!("Serialization error: {}", e)))
}

/// Return every normalization stage for an address as a JSON string.
///
/// Raises:
///     ValueError: If the trace cannot be serialized
#[pyfunction]
fn explain(address: &str) -> PyResult<String> {
    let trace = adresa_core::explain(address);
    serde_json::to_string_pretty(&trace)
        .map_err(|e| PyValueError::new_err(format!("Serialization error: {}", e)))
}

/// Cache key for a canonical address under the current scheme.
///
/// Keys change when the canonicalization rules change, so stale cache
/// entries are never matched.
#[pyfunction]
fn cache_key(canonical: &str) -> String {
    adresa_core::cache_key(canonical)
}

/// Hex SHA-256 fingerprint of the compiled canonicalization rules.
#[pyfunction]
fn scheme_fingerprint() -> String {
    adresa_core::scheme().fingerprint
}

/// adresa Python module — canonical Bucharest address normalizer
#[pymodule]
fn adresa(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(normalize, m)?)?;
    m.add_function(wrap_pyfunction!(parse_address, m)?)?;
    m.add_function(wrap_pyfunction!(explain, m)?)?;
    m.add_function(wrap_pyfunction!(cache_key, m)?)?;
    m.add_function(wrap_pyfunction!(scheme_fingerprint, m)?)?;
    m.add("SCHEME_VERSION", adresa_core::SCHEME_VERSION)?;
    Ok(())
}
