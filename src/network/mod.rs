//! Network Layer
//!
//! HTTP surface of the hunt. Owns the one lock around `HuntState`, the
//! tick loop and the admin gate. Game rules live in `game/`.

pub mod admin;
pub mod protocol;
pub mod service;
pub mod http;
pub mod server;

pub use admin::{AdminError, AdminPolicy};
pub use protocol::{ClaimReply, DiamondView, LeaderboardView, ScoreEntry};
pub use service::HuntService;
pub use http::router;
pub use server::{HuntServer, ServerConfig, ServerError};
