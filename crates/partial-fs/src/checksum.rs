//! SHA-256 checksum utilities
//!
//! One canonical format (`sha256:<hex>`) is used for every identity the
//! workspace derives from text, most notably extracted block ids.

use sha2::{Digest, Sha256};

const PREFIX: &str = "sha256:";

/// Compute the SHA-256 checksum of string content.
///
/// Returns a string in the canonical format `"sha256:<hex>"`.
pub fn compute_content_checksum(content: &str) -> String {
    compute_parts_checksum(&[content])
}

/// Compute one checksum over several text parts.
///
/// Parts are separated by a NUL byte before hashing, so `["ab", "c"]` and
/// `["a", "bc"]` never collide.
pub fn compute_parts_checksum(parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for (index, part) in parts.iter().enumerate() {
        if index > 0 {
            hasher.update([0u8]);
        }
        hasher.update(part.as_bytes());
    }
    format!("{}{:x}", PREFIX, hasher.finalize())
}
