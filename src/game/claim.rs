//! Claim Arbitration
//!
//! Turns a claim request into exactly one outcome. The whole check-and-take
//! runs against `&mut HuntState`, so the caller's lock makes it atomic with
//! respect to ticks and to other claims.
//!
//! Order of checks:
//!
//! 1. the diamond must still be on the field
//! 2. a first-time player is created on the spot and the presented secret
//!    becomes their credential
//! 3. the credential must match (before any ban status is revealed)
//! 4. the speed check may ban the player
//! 5. banned players are refused and the diamond stays on the field
//! 6. otherwise the diamond is taken and the score goes up by one

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::game::anticheat::SpeedVerdict;
use crate::game::diamond::DiamondId;
use crate::game::identity::CredentialCheck;
use crate::game::leaderboard::PlayerRecord;
use crate::game::state::HuntState;

/// A request to take one diamond.
#[derive(Debug, Clone)]
pub struct ClaimRequest {
    /// Diamond to take.
    pub diamond_id: DiamondId,
    /// Claiming player.
    pub player_id: String,
    /// Player's secret.
    pub credential: String,
    /// Display name to show on the leader board. Defaults to the player id.
    pub display_name: Option<String>,
}

impl ClaimRequest {
    /// Create a request without a display name.
    pub fn new(diamond_id: DiamondId, player_id: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            diamond_id,
            player_id: player_id.into(),
            credential: credential.into(),
            display_name: None,
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    fn effective_name(&self) -> String {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(self.player_id.as_str())
            .to_string()
    }
}

/// A successful claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimOutcome {
    /// The diamond now owned by the player.
    pub diamond_id: DiamondId,
    /// Player's score after the claim.
    pub score: u32,
}

/// Why a claim was refused. None of these change any state, except that
/// `Banned` may be the result of a ban issued by this very claim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimError {
    /// The diamond existed but somebody already took it.
    #[error("diamond gone: {0}")]
    Gone(DiamondId),

    /// No diamond with this id was ever spawned.
    #[error("diamond not found: {0}")]
    NotFound(DiamondId),

    /// Secret does not match the player's credential.
    #[error("wrong player password")]
    WrongCredential {
        /// Player that was claimed as.
        player_id: String,
    },

    /// The player is banned for cheating.
    #[error("player {player_id} is banned")]
    Banned {
        /// Banned player.
        player_id: String,
        /// Score frozen at the time of the ban.
        score: u32,
    },
}

/// Arbitrate a claim at time `now`.
pub fn arbitrate(
    state: &mut HuntState,
    request: &ClaimRequest,
    now: DateTime<Utc>,
) -> Result<ClaimOutcome, ClaimError> {
    let HuntState { field, leaderboard, identities, speed_policy, .. } = state;

    let diamond = match field.get(request.diamond_id) {
        Some(diamond) => diamond.clone(),
        None if field.was_issued(request.diamond_id) => {
            debug!("Diamond {} already gone (player {})", request.diamond_id, request.player_id);
            return Err(ClaimError::Gone(request.diamond_id));
        }
        None => {
            debug!("Diamond {} never existed (player {})", request.diamond_id, request.player_id);
            return Err(ClaimError::NotFound(request.diamond_id));
        }
    };

    let (record, created) = leaderboard.get_or_create(&request.player_id, || {
        PlayerRecord::new(&request.player_id, diamond.position, now)
    });
    if created {
        identities.bind(&request.player_id, &request.credential);
        info!("New player {}", request.player_id);
    }

    if identities.verify(&request.player_id, &request.credential) != CredentialCheck::Match {
        warn!("Wrong password for player {}", request.player_id);
        return Err(ClaimError::WrongCredential { player_id: request.player_id.clone() });
    }

    if !record.banned {
        let verdict = speed_policy.check(record.position, record.last_claim_at, diamond.position, now);
        if let SpeedVerdict::Implausible { distance, elapsed_secs } = verdict {
            record.ban();
            warn!(
                "Player {} banned for cheating: {:.1}px in {:.3}s (name: {})",
                request.player_id, distance, elapsed_secs, request.effective_name()
            );
        }
    }

    if record.banned {
        return Err(ClaimError::Banned {
            player_id: request.player_id.clone(),
            score: record.score,
        });
    }

    field.claim(diamond.id);
    let score = record.credit(diamond.position, now, request.effective_name());

    info!(
        "Diamond {} claimed by {} (score {}, {} left)",
        diamond.id, record.name, score, field.len()
    );

    Ok(ClaimOutcome { diamond_id: diamond.id, score })
}
