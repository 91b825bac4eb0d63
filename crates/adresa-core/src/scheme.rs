//! Canonicalization scheme versioning
//!
//! Caches key on canonical strings, so any change to the rule table
//! invalidates what they hold. The scheme fingerprint is a SHA-256 over the
//! version and every rule in table order; a changed rule changes the
//! fingerprint even if nobody bumped the version.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::rules;

/// Bump when normalization output changes for any input
pub const SCHEME_VERSION: u32 = 1;

/// Identity of the canonicalization rules compiled into this build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheme {
    pub version: u32,
    pub fingerprint: String,
}

/// Scheme of this build
pub fn scheme() -> Scheme {
    Scheme {
        version: SCHEME_VERSION,
        fingerprint: compute_fingerprint(),
    }
}

/// Cache key for a canonical address under the current scheme
pub fn cache_key(canonical: &str) -> String {
    format!("v{}:{}", SCHEME_VERSION, canonical)
}

fn compute_fingerprint() -> String {
    let mut hasher = Sha256::new();
    hasher.update(SCHEME_VERSION.to_be_bytes());
    for rule in rules::token_rules() {
        hasher.update(rule.pattern.as_str().as_bytes());
        hasher.update([0u8]);
        hasher.update(rule.replacement.as_bytes());
        hasher.update([0u8]);
    }
    format!("{:x}", hasher.finalize())
}
