//! Identity Store
//!
//! Binds player ids to secrets. There is no registration step: the secret
//! presented with a player's first claim becomes that player's credential,
//! and it can never be changed afterwards.

use std::collections::BTreeMap;

use crate::core::hash::{CredentialDigest, credential_digest, short_hex};

/// Outcome of checking a presented secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialCheck {
    /// Secret matches the bound credential.
    Match,
    /// A different secret is bound to this player.
    Mismatch,
    /// No credential is bound to this player yet.
    Unknown,
}

/// Player id to credential digest, first write wins.
#[derive(Debug, Default)]
pub struct IdentityStore {
    credentials: BTreeMap<String, CredentialDigest>,
}

impl IdentityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `secret` to `player_id` unless a credential already exists.
    ///
    /// Returns `true` if this call created the binding.
    pub fn bind(&mut self, player_id: &str, secret: &str) -> bool {
        if self.credentials.contains_key(player_id) {
            return false;
        }
        let digest = credential_digest(player_id, secret);
        tracing::debug!("Bound credential {} to player {}", short_hex(&digest), player_id);
        self.credentials.insert(player_id.to_string(), digest);
        true
    }

    /// Check a presented secret against the bound credential.
    pub fn verify(&self, player_id: &str, secret: &str) -> CredentialCheck {
        match self.credentials.get(player_id) {
            None => CredentialCheck::Unknown,
            Some(bound) if *bound == credential_digest(player_id, secret) => CredentialCheck::Match,
            Some(_) => CredentialCheck::Mismatch,
        }
    }

    /// Whether a credential is bound to this player.
    pub fn is_bound(&self, player_id: &str) -> bool {
        self.credentials.contains_key(player_id)
    }

    /// Number of bound players.
    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    /// Whether no player is bound.
    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }

    /// Forget every credential.
    pub fn reset_all(&mut self) {
        self.credentials.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_write_wins() {
        let mut store = IdentityStore::new();
        assert!(store.bind("alice", "secret"));
        assert!(!store.bind("alice", "other"));

        assert_eq!(store.verify("alice", "secret"), CredentialCheck::Match);
        assert_eq!(store.verify("alice", "other"), CredentialCheck::Mismatch);
    }

    #[test]
    fn test_unknown_player() {
        let store = IdentityStore::new();
        assert_eq!(store.verify("ghost", "x"), CredentialCheck::Unknown);
        assert!(!store.is_bound("ghost"));
    }

    #[test]
    fn test_players_are_independent() {
        let mut store = IdentityStore::new();
        store.bind("alice", "pw");
        store.bind("bob", "pw");
        assert_eq!(store.len(), 2);
        assert_eq!(store.verify("bob", "pw"), CredentialCheck::Match);
    }

    #[test]
    fn test_reset_allows_rebinding() {
        let mut store = IdentityStore::new();
        store.bind("alice", "old");
        store.reset_all();
        assert!(store.is_empty());

        assert!(store.bind("alice", "new"));
        assert_eq!(store.verify("alice", "new"), CredentialCheck::Match);
    }
}
