//! Content-based hashing for analysis IDs.

use sha2::{Digest, Sha256};

/// SHA-256 over the input payloads (in order) and the tool version.
///
/// Each payload is length-prefixed so that moving bytes between inputs
/// changes the id.
pub fn compute_analysis_id(payloads: &[&[u8]], tool_version: &str) -> String {
    let mut hasher = Sha256::new();

    for payload in payloads {
        hasher.update((payload.len() as u64).to_le_bytes());
        hasher.update(payload);
    }

    hasher.update(tool_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}

/// True for a 64-character lowercase hex digest, as produced by [`compute_analysis_id`].
pub fn is_analysis_id(id: &str) -> bool {
    id.len() == 64 && id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
