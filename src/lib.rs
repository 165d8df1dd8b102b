//! # Diamond Hunt Server
//!
//! Multiplayer "click the diamond" game server. Browsers long-poll for the
//! field, race to claim diamonds, and the server keeps score.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    DIAMOND HUNT SERVER                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/            - Primitives                               │
//! │  ├── position.rs  - Pixel positions and distances            │
//! │  ├── rng.rs       - Seedable Xorshift128+ PRNG               │
//! │  └── hash.rs      - Credential digests                       │
//! │                                                              │
//! │  game/            - Hunt rules (no locking, no I/O)          │
//! │  ├── field.rs     - Unclaimed diamonds and spawning          │
//! │  ├── waitqueue.rs - Parked list requests                     │
//! │  ├── identity.rs  - Player credentials                       │
//! │  ├── leaderboard.rs - Scores and positions                   │
//! │  ├── anticheat.rs - Movement speed check                     │
//! │  ├── claim.rs     - Claim arbitration                        │
//! │  ├── tick.rs      - Spawn + flush tick                       │
//! │  └── state.rs     - The shared hunt state                    │
//! │                                                              │
//! │  network/         - HTTP surface                             │
//! │  ├── service.rs   - Mutex-guarded state and tick loop        │
//! │  ├── http.rs      - Routes and status codes                  │
//! │  ├── admin.rs     - Referer gate for admin routes            │
//! │  ├── protocol.rs  - JSON shapes                              │
//! │  └── server.rs    - Listener and shutdown                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Consistency
//!
//! Every operation runs under a single lock over `HuntState`, so a diamond
//! is claimed by at most one player and each parked list request is
//! answered exactly once, with the field as of the tick that released it.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod network;

// Re-export commonly used types
pub use core::position::Position;
pub use core::rng::DeterministicRng;
pub use game::config::HuntConfig;
pub use game::state::HuntState;
pub use game::claim::{ClaimError, ClaimOutcome, ClaimRequest};
pub use network::{AdminPolicy, HuntServer, HuntService, ServerConfig};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tick period in milliseconds
pub const TICK_PERIOD_MS: u64 = 1000;
