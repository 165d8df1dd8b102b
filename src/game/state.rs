//! Hunt State
//!
//! Everything the hunt shares between requests, in one owned struct: the
//! field, the parked list requests, the leader board, the credentials and
//! the spawning switch. Callers hold one lock around it, so every method
//! here runs as a single serializable step.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::core::rng::DeterministicRng;
use crate::game::anticheat::SpeedPolicy;
use crate::game::claim::{arbitrate, ClaimError, ClaimOutcome, ClaimRequest};
use crate::game::config::HuntConfig;
use crate::game::field::DiamondField;
use crate::game::identity::IdentityStore;
use crate::game::leaderboard::LeaderBoard;
use crate::game::tick::{tick, TickResult};
use crate::game::waitqueue::{FlushReport, PendingList, WaitQueue};

/// Shared state of the hunt.
#[derive(Debug)]
pub struct HuntState {
    /// Unclaimed diamonds
    pub field: DiamondField,
    /// Parked "list diamonds" requests
    pub waiting: WaitQueue,
    /// Scores and last known positions
    pub leaderboard: LeaderBoard,
    /// Player credentials
    pub identities: IdentityStore,
    /// Whether ticks may spawn new diamonds
    pub spawning_enabled: bool,
    /// Anti-cheat speed check
    pub speed_policy: SpeedPolicy,
    /// Ticks run so far
    pub tick: u64,
    /// Make the next tick panic.
    #[cfg(test)]
    pub(crate) fail_next_tick: bool,
}

impl HuntState {
    /// Create a fresh hunt.
    pub fn new(config: &HuntConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => DeterministicRng::new(seed),
            None => DeterministicRng::from_entropy(),
        };

        Self {
            field: DiamondField::new(config.field_config(), rng),
            waiting: WaitQueue::new(),
            leaderboard: LeaderBoard::new(),
            identities: IdentityStore::new(),
            spawning_enabled: true,
            speed_policy: config.speed_policy(),
            tick: 0,
            #[cfg(test)]
            fail_next_tick: false,
        }
    }

    /// Park a "list diamonds" request until the next flush.
    pub fn enqueue_list(&mut self) -> PendingList {
        self.waiting.enqueue()
    }

    /// Run one spawn + flush tick.
    pub fn run_tick(&mut self) -> TickResult {
        tick(self)
    }

    /// Arbitrate a claim made at `now`.
    pub fn claim(&mut self, request: &ClaimRequest, now: DateTime<Utc>) -> Result<ClaimOutcome, ClaimError> {
        arbitrate(self, request, now)
    }

    /// Turn spawning on or off.
    pub fn set_spawning(&mut self, enabled: bool) {
        self.spawning_enabled = enabled;
    }

    /// Forget all players and diamonds and turn spawning back on.
    ///
    /// Parked list requests are answered right away with the empty field.
    /// Diamond ids keep counting up.
    pub fn reset_all(&mut self) -> FlushReport {
        self.leaderboard.reset_all();
        self.identities.reset_all();
        self.field.reset_all();
        self.spawning_enabled = true;

        let report = self.waiting.flush(&self.field.snapshot());
        info!("Hunt reset ({} waiting clients notified)", report.delivered);
        report
    }
}
