//! BLAKE3 helpers for text provenance and identity fingerprints.

use blake3::Hasher;

/// Full 32-byte BLAKE3 hash of a text (vector provenance, embedding cache keys).
#[inline]
pub fn hash_text(text: &str) -> [u8; 32] {
    *blake3::hash(text.as_bytes()).as_bytes()
}

/// First 8 bytes of a BLAKE3 hash, little-endian.
///
/// Only used for display/export fingerprints; equality checks inside the pipeline
/// compare the normalized strings themselves.
#[inline]
pub fn hash_to_u64(data: &[u8]) -> u64 {
    let hash = blake3::hash(data);
    let bytes: [u8; 8] = hash.as_bytes()[0..8]
        .try_into()
        .expect("BLAKE3 always produces at least 8 bytes");
    u64::from_le_bytes(bytes)
}

/// Order-sensitive hash of a list of texts.
///
/// Each text is length-prefixed so `["ab", "c"]` and `["a", "bc"]` differ.
pub fn hash_text_list<S: AsRef<str>>(texts: &[S]) -> [u8; 32] {
    let mut hasher = Hasher::new();
    hasher.update(&(texts.len() as u64).to_le_bytes());
    for text in texts {
        let bytes = text.as_ref().as_bytes();
        hasher.update(&(bytes.len() as u64).to_le_bytes());
        hasher.update(bytes);
    }
    *hasher.finalize().as_bytes()
}

/// Fingerprint of a candidate's normalized identity fields.
#[inline]
pub fn hash_identity(full_name: &str, company: &str, profile_url: &str) -> u64 {
    let mut hasher = Hasher::new();
    hasher.update(full_name.as_bytes());
    hasher.update(b"|");
    hasher.update(company.as_bytes());
    hasher.update(b"|");
    hasher.update(profile_url.as_bytes());

    let hash = hasher.finalize();
    let bytes: [u8; 8] = hash.as_bytes()[0..8]
        .try_into()
        .expect("BLAKE3 always produces at least 8 bytes");
    u64::from_le_bytes(bytes)
}
