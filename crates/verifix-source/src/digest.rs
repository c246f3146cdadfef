use sha2::{Digest, Sha256};

/// Sha256 of artifact text, hex encoded. Recorded per artifact so a report
/// can be tied back to the exact content it judged.
pub fn content_digest(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}
