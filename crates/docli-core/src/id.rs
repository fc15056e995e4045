//! Document ID generation
//!
//! IDs are the external key users type into `docli delete docmeta <id>`, so
//! they are kept short and shell-safe: 64 bits taken from a random UUIDv4,
//! encoded with the Base58 alphabet (no `0`, `O`, `I` or `l`, no punctuation).
//!
//! At this tool's scale (at most a few thousand documents per project) a
//! random collision is negligible. Callers that hold the current document set
//! should still use [`generate_unique`].

use uuid::Uuid;

/// Number of random bytes encoded into an ID
const ID_BYTES: usize = 8;

/// Generate a new document ID
pub fn generate() -> String {
    let uuid = Uuid::new_v4();
    bs58::encode(&uuid.as_bytes()[..ID_BYTES]).into_string()
}

/// Generate an ID that `is_taken` does not reject
///
/// Retries until an unused ID comes up.
pub fn generate_unique(is_taken: impl Fn(&str) -> bool) -> String {
    loop {
        let id = generate();
        if !is_taken(&id) {
            return id;
        }
        tracing::debug!("Generated ID {} is taken, retrying", id);
    }
}
