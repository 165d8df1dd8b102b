//! Credential Hashing
//!
//! Player secrets are never kept in memory verbatim. The identity store
//! holds a domain-separated SHA-256 digest bound to the player id, so two
//! players with the same secret still get different digests.

use sha2::{Sha256, Digest};

/// Hash output type (256 bits / 32 bytes)
pub type CredentialDigest = [u8; 32];

/// Incremental hasher with a domain separator.
///
/// Every field is length-prefixed so that `("ab", "c")` and `("a", "bc")`
/// cannot collide.
pub struct DomainHasher {
    hasher: Sha256,
}

impl DomainHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for player credentials.
    pub fn for_credential() -> Self {
        Self::new(b"DIAMOND_HUNT_CREDENTIAL_V1")
    }

    /// Update with a length-prefixed string.
    #[inline]
    pub fn update_str(&mut self, value: &str) {
        self.hasher.update((value.len() as u64).to_le_bytes());
        self.hasher.update(value.as_bytes());
    }

    /// Finalize and return the digest.
    pub fn finalize(self) -> CredentialDigest {
        self.hasher.finalize().into()
    }
}

/// Digest of a player's secret, bound to the player id.
pub fn credential_digest(player_id: &str, secret: &str) -> CredentialDigest {
    let mut hasher = DomainHasher::for_credential();
    hasher.update_str(player_id);
    hasher.update_str(secret);
    hasher.finalize()
}

/// Short hex prefix of a digest, for log lines.
pub fn short_hex(digest: &CredentialDigest) -> String {
    hex::encode(&digest[..4])
}
