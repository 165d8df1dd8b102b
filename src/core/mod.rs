//! Core primitives.
//!
//! Positions, the seeded spawn RNG and credential hashing. Nothing here
//! knows about players, diamonds or the network.

pub mod position;
pub mod rng;
pub mod hash;

// Re-export core types
pub use position::Position;
pub use rng::DeterministicRng;
pub use hash::{CredentialDigest, credential_digest};
