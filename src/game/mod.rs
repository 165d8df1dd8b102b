//! Game Logic Module
//!
//! The transport-agnostic core of the hunt. Nothing here locks, awaits or
//! talks to the network; `network/` wraps `HuntState` in a mutex.
//!
//! ## Module Structure
//!
//! - `diamond`: Diamond and color types
//! - `field`: Unclaimed diamonds and demand-driven spawning
//! - `waitqueue`: Parked "list diamonds" requests
//! - `identity`: Player credentials
//! - `leaderboard`: Scores and last known positions
//! - `anticheat`: Movement speed check
//! - `claim`: Claim arbitration
//! - `tick`: Spawn + flush tick
//! - `state`: The shared hunt state
//! - `config`: Hunt configuration

pub mod diamond;
pub mod field;
pub mod waitqueue;
pub mod identity;
pub mod leaderboard;
pub mod anticheat;
pub mod claim;
pub mod tick;
pub mod state;
pub mod config;

// Re-export key types
pub use diamond::{Color, Diamond, DiamondId};
pub use field::{DiamondField, FieldSnapshot};
pub use waitqueue::{FlushReport, PendingList, WaitQueue};
pub use leaderboard::{LeaderBoard, PlayerRecord};
pub use claim::{ClaimError, ClaimOutcome, ClaimRequest};
pub use tick::TickResult;
pub use state::HuntState;
pub use config::HuntConfig;
