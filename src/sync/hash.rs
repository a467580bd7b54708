//! Content hashing for sync operations.
//!
//! SHA256 digests of rendered documents let the synchronizer report whether
//! the rules document actually changed between passes without comparing
//! full texts.

use sha2::{Digest, Sha256};

/// Compute the SHA256 hex digest of a text body.
#[must_use]
pub fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Check if content has changed since the last pass.
///
/// Returns `true` if there is no stored hash (never written) or the hashes
/// differ.
#[must_use]
pub fn has_changed(current_hash: &str, stored_hash: Option<&str>) -> bool {
    stored_hash.is_none_or(|h| h != current_hash)
}
